use std::collections::HashSet;

use tracing::{error, info};

use crate::{
    components::{MountPoint, MountedControl, ProfileTabsControl, QuestionControl},
    config::PageContext,
    services::QaApi,
};

/// The parts of the host document bootstrap needs to inspect.
pub trait Document {
    fn has_element(&self, id: &str) -> bool;
}

/// Document described by the ids of the elements it contains.
#[derive(Debug, Clone, Default)]
pub struct StaticDocument {
    element_ids: HashSet<String>,
}

impl StaticDocument {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            element_ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl Document for StaticDocument {
    fn has_element(&self, id: &str) -> bool {
        self.element_ids.contains(id)
    }
}

/// 页面加载：检测挂载点，拉取数据并挂载对应的顶层控件
///
/// Each present mount point is handled on its own. A failed fetch is logged
/// and leaves that mount point empty.
pub async fn bootstrap<A, D>(context: &PageContext, api: &A, document: &D) -> Vec<MountedControl>
where
    A: QaApi + ?Sized,
    D: Document + ?Sized,
{
    let mut mounted = Vec::new();

    for point in MountPoint::ALL {
        if !document.has_element(point.element_id()) {
            continue;
        }

        match mount(context, api, point).await {
            Some(control) => {
                info!("Mounted control on #{}", point.element_id());
                mounted.push(control);
            }
            None => error!("Nothing mounted on #{}", point.element_id()),
        }
    }

    mounted
}

async fn mount<A: QaApi + ?Sized>(
    context: &PageContext,
    api: &A,
    point: MountPoint,
) -> Option<MountedControl> {
    match point {
        MountPoint::QuestionDetail => match api.get_question(&context.resource_id).await {
            Ok(question) => Some(MountedControl::Question(QuestionControl::new(context, question))),
            Err(e) => {
                error!("Failed to load question {}: {}", context.resource_id, e);
                None
            }
        },
        MountPoint::Profile => match api.get_profile(&context.resource_id).await {
            Ok(profile) => Some(MountedControl::Profile(ProfileTabsControl::new(profile))),
            Err(e) => {
                error!("Failed to load profile {}: {}", context.resource_id, e);
                None
            }
        },
    }
}

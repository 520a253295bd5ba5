/// Items that can be looked up by a server-assigned id.
pub trait Identified {
    fn id(&self) -> i64;
}

/// 按ID索引的有序本地集合
///
/// Holds a control's owned copy of a server-supplied collection. Order is the
/// order received; inserts append and removals splice in place. Every mutation
/// consumes the collection and returns the new one, so state transitions can be
/// tested without any rendering involved.
#[derive(Debug, Clone, PartialEq)]
pub struct IdCache<T> {
    items: Vec<T>,
}

impl<T> Default for IdCache<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> IdCache<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// 追加一项（保持原有顺序）
    pub fn inserted(mut self, item: T) -> Self {
        self.items.push(item);
        self
    }

    /// 删除第一条ID匹配的项，返回新集合和被删除的项
    pub fn removed(mut self, id: i64) -> (Self, Option<T>) {
        let taken = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .map(|index| self.items.remove(index));
        (self, taken)
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().map(Identified::id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

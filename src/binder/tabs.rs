//! Single-selection tab group over the product variants

/// Active variant index, always in `0..len`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabGroup {
    len: usize,
    active: usize,
}

impl TabGroup {
    /// `None` when there are no variants.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, active: 0 })
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == index
    }

    /// Makes `index` the active tab; out-of-range indices are ignored.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.active = index;
        true
    }
}

/// Table id of the tab at `index` (`tab1`, `tab2`, ...)
pub fn panel_id(index: usize) -> String {
    format!("tab{}", index + 1)
}

/// Id of the tab button controlling the panel at `index`
pub fn button_id(index: usize) -> String {
    format!("tab{}-btn", index + 1)
}

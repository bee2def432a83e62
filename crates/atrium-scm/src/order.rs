//! Tab ordering
//!
//! Well-known tabs carry fixed weights so they group in a stable relative
//! order. Unrecognized tabs land after all of them, and the `Last` sentinel
//! weight is available as an explicit override for tabs that must stay at
//! the very end.

use atrium_dock::Content;

pub const CHANGES: &str = "Changes";
pub const REPOSITORY: &str = "Repository";
pub const INCOMING: &str = "Incoming";
pub const SHELF: &str = "Shelf";
pub const BRANCHES: &str = "Branches";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderWeight {
    Changes,
    Repository,
    Incoming,
    Shelf,
    Branches,
    Other,
    Last,
}

impl OrderWeight {
    const ALL: [OrderWeight; 7] = [
        OrderWeight::Changes,
        OrderWeight::Repository,
        OrderWeight::Incoming,
        OrderWeight::Shelf,
        OrderWeight::Branches,
        OrderWeight::Other,
        OrderWeight::Last,
    ];

    pub fn tab_name(self) -> Option<&'static str> {
        match self {
            OrderWeight::Changes => Some(CHANGES),
            OrderWeight::Repository => Some(REPOSITORY),
            OrderWeight::Incoming => Some(INCOMING),
            OrderWeight::Shelf => Some(SHELF),
            OrderWeight::Branches => Some(BRANCHES),
            OrderWeight::Other | OrderWeight::Last => None,
        }
    }

    pub fn weight(self) -> i32 {
        match self {
            OrderWeight::Changes => 10,
            OrderWeight::Repository => 20,
            OrderWeight::Incoming => 30,
            OrderWeight::Shelf => 40,
            OrderWeight::Branches => 50,
            OrderWeight::Other => 100,
            OrderWeight::Last => i32::MAX,
        }
    }
}

/// Effective sort weight of a tab: the explicit override if one is set,
/// else the weight of its well-known name, else `Other`.
pub fn content_weight(content: &Content) -> i32 {
    if let Some(weight) = content.order_weight() {
        return weight;
    }
    for value in OrderWeight::ALL {
        if value.tab_name() == Some(content.tab_name()) {
            return value.weight();
        }
    }
    OrderWeight::Other.weight()
}

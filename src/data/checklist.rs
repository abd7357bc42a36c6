//! Pre-brew checklist.
//!
//! The checklist is owned by the host UI; the session controller only reads
//! whether it is complete before leaving setup.

/// A single item on the pre-brew checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChecklistItem {
    /// Coffee ground medium-fine.
    Grind,
    /// Water heated.
    Water,
    /// Ice weighed into the carafe.
    Ice,
    /// Dripper, rinsed filter and carafe on the scale.
    V60Setup,
}

impl ChecklistItem {
    /// All checklist items in display order.
    pub const ALL: [ChecklistItem; 4] = [Self::Grind, Self::Water, Self::Ice, Self::V60Setup];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Grind => "Grind coffee",
            Self::Water => "Heat water",
            Self::Ice => "Add ice to carafe",
            Self::V60Setup => "Set up V60 and rinse filter",
        }
    }
}

/// Completion flags for each checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checklist {
    /// Coffee ground.
    pub grind: bool,
    /// Water heated.
    pub water: bool,
    /// Ice in the carafe.
    pub ice: bool,
    /// Dripper set up.
    pub v60_setup: bool,
}

impl Checklist {
    /// Create an empty checklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// A checklist with every item ticked.
    pub fn completed() -> Self {
        Self {
            grind: true,
            water: true,
            ice: true,
            v60_setup: true,
        }
    }

    /// Get the flag for an item.
    pub fn get(&self, item: ChecklistItem) -> bool {
        match item {
            ChecklistItem::Grind => self.grind,
            ChecklistItem::Water => self.water,
            ChecklistItem::Ice => self.ice,
            ChecklistItem::V60Setup => self.v60_setup,
        }
    }

    /// Set the flag for an item.
    pub fn set(&mut self, item: ChecklistItem, done: bool) {
        let flag = match item {
            ChecklistItem::Grind => &mut self.grind,
            ChecklistItem::Water => &mut self.water,
            ChecklistItem::Ice => &mut self.ice,
            ChecklistItem::V60Setup => &mut self.v60_setup,
        };
        *flag = done;
    }

    /// Flip the flag for an item and return its new value.
    pub fn toggle(&mut self, item: ChecklistItem) -> bool {
        let done = !self.get(item);
        self.set(item, done);
        done
    }

    /// True when every item is ticked.
    pub fn is_complete(&self) -> bool {
        ChecklistItem::ALL.iter().all(|item| self.get(*item))
    }

    /// Items still outstanding, in display order.
    pub fn missing(&self) -> Vec<ChecklistItem> {
        ChecklistItem::ALL
            .into_iter()
            .filter(|item| !self.get(*item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_gate() {
        let mut checklist = Checklist::new();
        assert!(!checklist.is_complete());
        assert_eq!(checklist.missing().len(), 4);

        for item in ChecklistItem::ALL {
            checklist.set(item, true);
        }
        assert!(checklist.is_complete());
        assert_eq!(checklist, Checklist::completed());
    }

    #[test]
    fn test_checklist_toggle() {
        let mut checklist = Checklist::completed();
        assert!(!checklist.toggle(ChecklistItem::Ice));
        assert!(!checklist.is_complete());
        assert_eq!(checklist.missing(), vec![ChecklistItem::Ice]);
        assert!(checklist.toggle(ChecklistItem::Ice));
        assert!(checklist.is_complete());
    }
}

use crate::selection::command::{Command, Selector};
use crate::selection::presets::{find_preset, Preset};
use std::collections::BTreeSet;
use std::fmt;

/// Messages produced while applying a command, shown before the menu is
/// redrawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    OutOfRange { index: usize, max: usize },
    OutOfRangeSpan { start: usize, end: usize, max: usize },
    Malformed(String),
    InvalidCommand(String),
    PresetApplied {
        name: String,
        matched: usize,
        total_selected: usize,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::OutOfRange { index, max } => {
                write!(f, "Number {} is out of range (1-{})", index, max)
            }
            Notice::OutOfRangeSpan { start, end, max } => {
                write!(f, "Numbers {}-{} are out of range (1-{})", start, end, max)
            }
            Notice::Malformed(token) => write!(f, "Ignoring malformed entry '{}'", token),
            Notice::InvalidCommand(input) => write!(
                f,
                "Invalid input '{}'. Please enter numbers, ranges (1-3), or commands (all/none/done)",
                input
            ),
            Notice::PresetApplied {
                name,
                matched,
                total_selected,
            } => write!(
                f,
                "Applied preset: {}. Added {} items from preset, {} selected in total",
                name, matched, total_selected
            ),
        }
    }
}

impl Notice {
    pub fn is_warning(&self) -> bool {
        !matches!(self, Notice::PresetApplied { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Continue(Vec<Notice>),
    Finished,
    Cancelled,
}

/// Toggle/range/preset selection over a fixed, ordered list of names.
///
/// The selected set may hold preset names that are not items of this
/// session; they never show up as kept items and never affect removal.
#[derive(Debug, Clone)]
pub struct SelectionSession<'p> {
    items: Vec<String>,
    selected: BTreeSet<String>,
    presets: &'p [Preset],
}

impl<'p> SelectionSession<'p> {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            selected: BTreeSet::new(),
            presets: &[],
        }
    }

    pub fn with_presets(mut self, presets: &'p [Preset]) -> Self {
        self.presets = presets;
        self
    }

    pub fn with_all_selected(mut self) -> Self {
        self.selected = self.items.iter().cloned().collect();
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn presets(&self) -> &'p [Preset] {
        self.presets
    }

    pub fn is_selected(&self, item: &str) -> bool {
        self.selected.contains(item)
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Selected items in menu order.
    pub fn kept_items(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| self.selected.contains(*item))
            .map(String::as_str)
            .collect()
    }

    pub fn unselected_items(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| !self.selected.contains(*item))
            .map(String::as_str)
            .collect()
    }

    pub fn apply_input(&mut self, input: &str) -> Transition {
        let command = Command::parse(input, self.presets);
        self.apply(&command)
    }

    pub fn apply(&mut self, command: &Command) -> Transition {
        match command {
            Command::Done => Transition::Finished,
            Command::Quit => Transition::Cancelled,
            Command::All => {
                self.selected = self.items.iter().cloned().collect();
                Transition::Continue(Vec::new())
            }
            Command::None => {
                self.selected.clear();
                Transition::Continue(Vec::new())
            }
            Command::Preset(key) => Transition::Continue(self.apply_preset(key)),
            Command::Toggle {
                selectors,
                malformed,
            } => {
                let mut notices: Vec<Notice> =
                    malformed.iter().cloned().map(Notice::Malformed).collect();
                for selector in selectors {
                    self.toggle(*selector, &mut notices);
                }
                Transition::Continue(notices)
            }
            Command::Invalid(input) => {
                Transition::Continue(vec![Notice::InvalidCommand(input.clone())])
            }
        }
    }

    fn apply_preset(&mut self, key: &str) -> Vec<Notice> {
        let Some(preset) = find_preset(self.presets, key) else {
            return vec![Notice::InvalidCommand(key.to_string())];
        };

        self.selected
            .extend(preset.vendors.iter().map(|v| v.to_string()));

        let matched = self.items.iter().filter(|i| preset.contains(i)).count();
        vec![Notice::PresetApplied {
            name: preset.name.to_string(),
            matched,
            total_selected: self.kept_items().len(),
        }]
    }

    fn toggle(&mut self, selector: Selector, notices: &mut Vec<Notice>) {
        let max = self.items.len();
        let indices = selector.indices();
        let (start, end) = (*indices.start(), *indices.end());

        let first_valid = start.max(1);
        let last_valid = end.min(max);
        if first_valid <= last_valid {
            for index in first_valid..=last_valid {
                let item = &self.items[index - 1];
                if !self.selected.remove(item) {
                    self.selected.insert(item.clone());
                }
            }
        }

        if start == 0 {
            notices.push(Notice::OutOfRange { index: 0, max });
        }

        let first_over = start.max(max + 1);
        if first_over <= end {
            if first_over == end {
                notices.push(Notice::OutOfRange { index: end, max });
            } else {
                notices.push(Notice::OutOfRangeSpan {
                    start: first_over,
                    end,
                    max,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::presets::VENDOR_PRESETS;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn vendor_session() -> SelectionSession<'static> {
        SelectionSession::new(names(&["Cisco", "Microsoft", "webex", "common"]))
            .with_presets(VENDOR_PRESETS)
    }

    fn fifteen_items() -> SelectionSession<'static> {
        SelectionSession::new((1..=15).map(|i| format!("vendor{:02}", i)).collect())
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        for times in 1..=6 {
            let mut session = vendor_session();
            session.apply_input("1");
            let before = session.selected().clone();

            for _ in 0..times {
                session.apply_input("3");
            }

            if times % 2 == 0 {
                assert_eq!(session.selected(), &before);
            } else {
                let mut expected = before.clone();
                expected.insert("webex".to_string());
                assert_eq!(session.selected(), &expected);
            }
        }
    }

    #[test]
    fn test_toggle_keeps_other_selections() {
        let mut session = vendor_session();
        session.apply_input("1,2");
        session.apply_input("2");
        assert_eq!(session.selected(), &set(&["Cisco"]));
    }

    #[test]
    fn test_range_equals_list() {
        let mut by_range = fifteen_items();
        let mut by_list = fifteen_items();

        by_range.apply_input("1-5");
        by_list.apply_input("1,2,3,4,5");

        assert_eq!(by_range.selected(), by_list.selected());
        assert_eq!(by_range.selected().len(), 5);
    }

    #[test]
    fn test_out_of_range_changes_nothing() {
        let mut session = fifteen_items();
        session.apply_input("2");
        let before = session.selected().clone();

        let transition = session.apply_input("999");

        assert_eq!(session.selected(), &before);
        assert_eq!(
            transition,
            Transition::Continue(vec![Notice::OutOfRange { index: 999, max: 15 }])
        );
    }

    #[test]
    fn test_zero_and_partial_ranges() {
        let mut session = fifteen_items();

        let transition = session.apply_input("0");
        assert!(session.selected().is_empty());
        assert_eq!(
            transition,
            Transition::Continue(vec![Notice::OutOfRange { index: 0, max: 15 }])
        );

        let transition = session.apply_input("14-1000000000000");
        assert_eq!(session.selected(), &set(&["vendor14", "vendor15"]));
        assert_eq!(
            transition,
            Transition::Continue(vec![Notice::OutOfRangeSpan {
                start: 16,
                end: 1_000_000_000_000,
                max: 15
            }])
        );
    }

    #[test]
    fn test_malformed_tokens_warn_but_valid_ones_apply() {
        let mut session = vendor_session();
        let transition = session.apply_input("1,zz");

        assert_eq!(session.selected(), &set(&["Cisco"]));
        assert_eq!(
            transition,
            Transition::Continue(vec![Notice::Malformed("zz".to_string())])
        );
    }

    #[test]
    fn test_invalid_input_changes_nothing() {
        let mut session = vendor_session();
        session.apply_input("2");

        let transition = session.apply_input("bogus");

        assert_eq!(session.selected(), &set(&["Microsoft"]));
        assert_eq!(
            transition,
            Transition::Continue(vec![Notice::InvalidCommand("bogus".to_string())])
        );
    }

    #[test]
    fn test_all_and_none_replace() {
        let mut session = vendor_session();
        session.apply_input("cisco");
        session.apply_input("all");
        session.apply_input("none");
        assert!(session.selected().is_empty());

        session.apply_input("2");
        session.apply_input("none");
        session.apply_input("all");
        assert_eq!(
            session.selected(),
            &set(&["Cisco", "Microsoft", "webex", "common"])
        );
    }

    #[test]
    fn test_preset_is_idempotent() {
        let mut once = vendor_session();
        once.apply_input("microsoft");

        let mut twice = vendor_session();
        twice.apply_input("microsoft");
        twice.apply_input("microsoft");

        assert_eq!(once.selected(), twice.selected());
    }

    #[test]
    fn test_presets_union_in_any_order() {
        let mut ab = vendor_session();
        ab.apply_input("cisco");
        ab.apply_input("webex");

        let mut ba = vendor_session();
        ba.apply_input("webex");
        ba.apply_input("cisco");

        let mut expected: BTreeSet<String> = BTreeSet::new();
        for key in ["cisco", "webex"] {
            let preset = find_preset(VENDOR_PRESETS, key).unwrap();
            expected.extend(preset.vendors.iter().map(|v| v.to_string()));
        }

        assert_eq!(ab.selected(), &expected);
        assert_eq!(ba.selected(), &expected);
    }

    #[test]
    fn test_preset_never_removes() {
        let mut session = vendor_session();
        session.apply_input("2");
        session.apply_input("cisco");
        assert!(session.is_selected("Microsoft"));
    }

    #[test]
    fn test_preset_notice_counts_catalog_matches() {
        let mut session = vendor_session();
        let transition = session.apply_input("cisco");

        assert_eq!(
            transition,
            Transition::Continue(vec![Notice::PresetApplied {
                name: "Cisco".to_string(),
                matched: 2,
                total_selected: 2,
            }])
        );
    }

    #[test]
    fn test_documented_filter_scenario() {
        let mut session = vendor_session();

        session.apply_input("cisco");
        assert_eq!(session.kept_items(), vec!["Cisco", "common"]);

        session.apply_input("2");
        assert_eq!(session.kept_items(), vec!["Cisco", "Microsoft", "common"]);

        assert_eq!(session.apply_input("done"), Transition::Finished);
        assert_eq!(session.unselected_items(), vec!["webex"]);
    }

    #[test]
    fn test_quit_and_done() {
        let mut session = vendor_session();
        assert_eq!(session.apply_input("q"), Transition::Cancelled);
        assert_eq!(session.apply_input(""), Transition::Finished);
    }

    #[test]
    fn test_empty_session() {
        let mut session = SelectionSession::new(Vec::new()).with_presets(VENDOR_PRESETS);
        assert_eq!(
            session.apply_input("1"),
            Transition::Continue(vec![Notice::OutOfRange { index: 1, max: 0 }])
        );
        session.apply_input("all");
        assert!(session.selected().is_empty());
        assert_eq!(session.apply_input("done"), Transition::Finished);
    }

    #[test]
    fn test_all_selected_start() {
        let session = SelectionSession::new(names(&["a", "b"])).with_all_selected();
        assert_eq!(session.kept_items(), vec!["a", "b"]);
        assert!(session.unselected_items().is_empty());
    }
}

/// A named group of vendor directory names that can be kept in one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub vendors: &'static [&'static str],
}

impl Preset {
    pub fn contains(&self, vendor: &str) -> bool {
        self.vendors.contains(&vendor)
    }
}

pub const VENDOR_PRESETS: &[Preset] = &[
    Preset {
        key: "cisco",
        name: "Cisco",
        description: "Cisco on-premises infrastructure vendors",
        vendors: &[
            "Allocations",
            "Cisco",
            "Directory",
            "ForgottenPassword",
            "Technical",
            "User",
            "WrongAttempt",
            "common",
            "licensing",
        ],
    },
    Preset {
        key: "microsoft",
        name: "Microsoft",
        description: "Microsoft cloud and collaboration vendors",
        vendors: &["Microsoft", "m365", "office365", "office365graph"],
    },
    Preset {
        key: "webex",
        name: "Webex",
        description: "Cisco Webex collaboration and contact center vendors",
        vendors: &["webex", "webexContactCenter", "webexcontactcenter"],
    },
];

pub fn find_preset<'a>(presets: &'a [Preset], key: &str) -> Option<&'a Preset> {
    presets.iter().find(|p| p.key == key)
}

/// Archive metadata member that never belongs to a category.
pub const WORKSPACE_MANIFEST: &str = "workspace.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub description: &'static str,
    pub patterns: &'static [&'static str],
}

impl Category {
    /// Patterns are `*<suffix>` globs; the match is an exact, case-sensitive
    /// suffix comparison on the file name.
    pub fn matches(&self, filename: &str) -> bool {
        self.patterns.iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(suffix) => filename.ends_with(suffix),
            None => filename == *pattern,
        })
    }
}

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "service_definitions",
        description: "Kurmi service definitions",
        patterns: &["*.service.xml", "*.serviceorder.json"],
    },
    Category {
        name: "service_inference",
        description: "Kurmi service inference files",
        patterns: &["*.inference.js"],
    },
    Category {
        name: "quickfeatures",
        description: "QuickFeature files (JS/XML/properties)",
        patterns: &[
            "*.quickfeature.xml",
            "*.quickfeature.js",
            "*.quickfeature.properties",
        ],
    },
    Category {
        name: "js_libraries",
        description: "JavaScript libraries and utilities",
        patterns: &[
            "*.util.js",
            "*.apiutil.js",
            "*.postProcessing.js",
            "*.builtin.util.js",
        ],
    },
    Category {
        name: "widgets",
        description: "Widget files",
        patterns: &["*.widget.js"],
    },
    Category {
        name: "scenarios",
        description: "Scenario files, schemas, rules, and related libraries",
        patterns: &[
            "*.scenario.json",
            "*.schema.json",
            "*.rules.json",
            "*.data.json",
            "*.options.json",
            "*.choice.json",
            "*.kurmiApi.js",
            "*.configuration.js",
            "*.import.js",
            "*.export.js",
            "*.externalTask.js",
            "*.processing.js",
            "*.discovery.js",
            "*.ruleSet.json",
            "*.componentAdjustment.js",
            "*.mergeAdjust.js",
        ],
    },
    Category {
        name: "connectors",
        description: "Connector files (XML/properties)",
        patterns: &[
            "*.advancedConnector.xml",
            "*.connector.xml",
            "*.connector.properties",
        ],
    },
    Category {
        name: "directory_connectors",
        description: "Directory connector files",
        patterns: &["*.directoryModel.xml"],
    },
    Category {
        name: "emails",
        description: "Email template files",
        patterns: &["*.mail.js"],
    },
];

pub fn find(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.name == name)
}

pub fn names() -> Vec<&'static str> {
    CATEGORIES.iter().map(|c| c.name).collect()
}

/// Maps archive member names onto the categories chosen for a run.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    categories: Vec<&'static Category>,
}

impl CategoryClassifier {
    pub fn new(categories: Vec<&'static Category>) -> Self {
        Self { categories }
    }

    /// Builds a classifier from category names, keeping declaration order so
    /// the first declared category wins on overlapping patterns.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let categories = CATEGORIES
            .iter()
            .filter(|c| names.iter().any(|n| n.as_ref() == c.name))
            .collect();
        Self { categories }
    }

    pub fn classify(&self, filename: &str) -> Option<&'static Category> {
        if filename == WORKSPACE_MANIFEST {
            return None;
        }

        self.categories.iter().copied().find(|c| c.matches(filename))
    }

    pub fn categories(&self) -> &[&'static Category] {
        &self.categories
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new(CATEGORIES.iter().collect())
    }
}

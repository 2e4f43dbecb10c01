//! Strings file layout rule.
//!
//! Component trees follow a fixed layout: a string `title`, flow sections
//! under `config`/`options`, and per-class translations under
//! `entity_component`. Names outside the layout are reported as warnings
//! (they are usually typos that silently drop a label); sections holding the
//! wrong kind of value are errors.

use serde_json::{Map, Value};

use crate::{
    core::{
        Namespace, ResourceTree,
        parsers::{json::value_kind, reference::KEY_SEPARATOR},
    },
    issues::{InvalidStructureIssue, Issue, UnknownSectionIssue},
};

const TOP_LEVEL_SECTIONS: &[&str] = &[
    "title",
    "config",
    "options",
    "entity_component",
    "selector",
    "services",
    "issues",
    "exceptions",
    "entity",
    "device_automation",
    "system_health",
];

const FLOW_SECTIONS: &[&str] = &[
    "step",
    "error",
    "abort",
    "progress",
    "flow_title",
    "create_entry",
];

const STEP_FIELDS: &[&str] = &[
    "title",
    "description",
    "menu_options",
    "data",
    "data_description",
    "sections",
    "submit",
];

const ENTITY_COMPONENT_FIELDS: &[&str] = &["name", "state", "state_attributes"];

pub fn check_structure_issues(trees: &[&ResourceTree]) -> Vec<Issue> {
    trees
        .iter()
        .filter(|tree| tree.namespace != Namespace::Core)
        .flat_map(|tree| check_structure(tree))
        .collect()
}

/// Check one component tree against the strings file layout.
pub fn check_structure(tree: &ResourceTree) -> Vec<Issue> {
    let mut checker = StructureChecker {
        tree,
        issues: Vec::new(),
    };

    for (name, value) in &tree.root {
        match name.as_str() {
            "title" => checker.expect_string(name, value),
            "config" => checker.check_flow(name, value, "config section"),
            "options" => checker.check_flow(name, value, "options section"),
            "entity_component" => checker.check_entity_component(name, value),
            known if TOP_LEVEL_SECTIONS.contains(&known) => {
                checker.expect_object(name, value);
            }
            _ => checker.unknown(name, "top-level section"),
        }
    }

    checker.issues
}

struct StructureChecker<'a> {
    tree: &'a ResourceTree,
    issues: Vec<Issue>,
}

impl StructureChecker<'_> {
    fn check_flow(&mut self, key: &str, value: &Value, scope: &'static str) {
        let Some(sections) = self.expect_object(key, value) else {
            return;
        };

        for (name, value) in sections {
            let section_key = join(key, name);
            match name.as_str() {
                "flow_title" => self.expect_string(&section_key, value),
                "step" => {
                    let Some(steps) = self.expect_object(&section_key, value) else {
                        continue;
                    };
                    for (step_id, step) in steps {
                        let step_key = join(&section_key, step_id);
                        if let Some(fields) = self.expect_object(&step_key, step) {
                            self.check_step(&step_key, fields);
                        }
                    }
                }
                known if FLOW_SECTIONS.contains(&known) => {
                    self.expect_object(&section_key, value);
                }
                _ => self.unknown(&section_key, scope),
            }
        }
    }

    fn check_step(&mut self, key: &str, fields: &Map<String, Value>) {
        for (name, value) in fields {
            let field_key = join(key, name);
            match name.as_str() {
                "title" | "description" | "submit" => self.expect_string(&field_key, value),
                known if STEP_FIELDS.contains(&known) => {
                    self.expect_object(&field_key, value);
                }
                _ => self.unknown(&field_key, "step field"),
            }
        }
    }

    fn check_entity_component(&mut self, key: &str, value: &Value) {
        let Some(classes) = self.expect_object(key, value) else {
            return;
        };

        for (class, value) in classes {
            let class_key = join(key, class);
            let Some(fields) = self.expect_object(&class_key, value) else {
                continue;
            };
            for (name, value) in fields {
                let field_key = join(&class_key, name);
                match name.as_str() {
                    "name" => self.expect_string(&field_key, value),
                    known if ENTITY_COMPONENT_FIELDS.contains(&known) => {
                        self.expect_object(&field_key, value);
                    }
                    _ => self.unknown(&field_key, "entity component field"),
                }
            }
        }
    }

    fn expect_string(&mut self, key: &str, value: &Value) {
        if !value.is_string() {
            self.invalid(key, "a string", value);
        }
    }

    fn expect_object<'v>(&mut self, key: &str, value: &'v Value) -> Option<&'v Map<String, Value>> {
        let object = value.as_object();
        if object.is_none() {
            self.invalid(key, "an object", value);
        }
        object
    }

    fn invalid(&mut self, key: &str, expected: &str, value: &Value) {
        self.issues
            .push(Issue::InvalidStructure(InvalidStructureIssue {
                context: self.tree.locate(key),
                expected: expected.to_string(),
                found: value_kind(value).to_string(),
            }));
    }

    fn unknown(&mut self, key: &str, scope: &'static str) {
        self.issues.push(Issue::UnknownSection(UnknownSectionIssue {
            context: self.tree.locate(key),
            scope,
        }));
    }
}

fn join(prefix: &str, name: &str) -> String {
    format!("{}{}{}", prefix, KEY_SEPARATOR, name)
}

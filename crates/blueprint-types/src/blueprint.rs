//! Blueprint document model.
//!
//! A blueprint is a named, ordered list of modules exported from a
//! workflow-automation designer. The order of `flow` is execution order; the
//! designer coordinates stored in each module's metadata are used only for
//! display.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Blueprint
// ---------------------------------------------------------------------------

/// A parsed blueprint document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Scenario name shown to the user.
    pub name: String,
    /// Modules in execution order.
    pub flow: Vec<Module>,
    /// Designer metadata (version, scenario settings). Preserved verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Blueprint {
    /// Look up a module by its id.
    pub fn module(&self, id: i64) -> Option<&Module> {
        self.flow.iter().find(|m| m.id == id)
    }
}

// ---------------------------------------------------------------------------
// Module
// ---------------------------------------------------------------------------

fn default_module_version() -> i64 {
    1
}

/// One step of a blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Identifier, unique within a blueprint.
    pub id: i64,
    /// Human-readable label.
    #[serde(default)]
    pub label: String,
    /// Type identifier (e.g. `http:ActionSendData`, `json:ParseJSON`).
    ///
    /// Exported blueprints call this field `module`; `type` is accepted too.
    #[serde(rename = "module", alias = "type")]
    pub module_type: String,
    /// Module implementation version.
    #[serde(default = "default_module_version")]
    pub version: i64,
    /// Static configuration for the module.
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// Data-mapping rules (transform-style modules only).
    ///
    /// Kept as a raw value so a malformed mapper reaches the mapping handler
    /// and is reported as a module failure instead of a decode error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapper: Option<Value>,
    /// Designer metadata (canvas position, restore/expect hints).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModuleMetadata>,
}

impl Module {
    /// The handler family for this module.
    pub fn kind(&self) -> ModuleKind {
        ModuleKind::classify(&self.module_type)
    }

    /// Canvas position, or the origin when the module carries no designer data.
    pub fn position(&self) -> Position {
        self.metadata
            .as_ref()
            .map(|m| m.designer)
            .unwrap_or_default()
    }

    /// The reduced view of this module used in prompts and listings.
    pub fn summary(&self) -> ModuleSummary {
        ModuleSummary {
            id: self.id,
            label: self.label.clone(),
            module: self.module_type.clone(),
            mapper: self.mapper.clone(),
        }
    }
}

/// Designer metadata attached to a module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// Canvas coordinates.
    #[serde(default)]
    pub designer: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Value>,
}

/// Canvas coordinates of a module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Module fields relevant to an explanation: id, label, type and mapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSummary {
    pub id: i64,
    pub label: String,
    pub module: String,
    pub mapper: Option<Value>,
}

/// Ingestion report for a blueprint: modules listed in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintOverview {
    pub name: String,
    pub module_count: usize,
    pub modules: Vec<ModuleOverview>,
}

/// One row of a [`BlueprintOverview`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleOverview {
    pub id: i64,
    pub label: String,
    pub module: String,
    pub kind: ModuleKind,
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapper: Option<Value>,
}

impl From<&Module> for ModuleOverview {
    fn from(module: &Module) -> Self {
        Self {
            id: module.id,
            label: module.label.clone(),
            module: module.module_type.clone(),
            kind: module.kind(),
            position: module.position(),
            mapper: module.mapper.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// ModuleKind
// ---------------------------------------------------------------------------

/// Handler family a module is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    /// Outbound HTTP request.
    Http,
    /// Flat key/template mapping over the input payload.
    Json,
    /// Webhook trigger stub (no I/O).
    Webhook,
    /// Anything else: passed through untouched.
    Unsupported,
}

impl ModuleKind {
    /// Substring markers checked in order. The first marker contained in the
    /// lower-cased type identifier wins, so `http-webhook` is `Http`.
    pub const PRIORITY: [(&'static str, ModuleKind); 3] = [
        ("http", ModuleKind::Http),
        ("json", ModuleKind::Json),
        ("webhook", ModuleKind::Webhook),
    ];

    /// Classify a module type identifier.
    pub fn classify(type_identifier: &str) -> Self {
        let lowered = type_identifier.to_lowercase();
        Self::PRIORITY
            .iter()
            .find(|(marker, _)| lowered.contains(marker))
            .map(|(_, kind)| *kind)
            .unwrap_or(ModuleKind::Unsupported)
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleKind::Http => write!(f, "http"),
            ModuleKind::Json => write!(f, "json"),
            ModuleKind::Webhook => write!(f, "webhook"),
            ModuleKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

//! The parsed form of a component file.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static TYPESCRIPT_LANG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^tsx?$").expect("language pattern is valid"));

/// Kind of a top-level block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// `<template>`
    Template,
    /// `<script>` or `<script setup>`
    Script,
    /// `<style>`
    Style,
}

impl BlockKind {
    /// Tag name of the block.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Template => "template",
            BlockKind::Script => "script",
            BlockKind::Style => "style",
        }
    }
}

/// One top-level block of a component file.
///
/// A block is inline (`content` holds its text) or external (`src` names a
/// file relative to the component and `content` is empty).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Which block this is.
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Inline text of the block.
    #[serde(default)]
    pub content: String,
    /// External file reference, relative to the component file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Language tag (`lang="ts"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// All attributes of the opening tag; valueless attributes are `true`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, serde_json::Value>,
    /// Byte offset of the block content in the component file.
    #[serde(default)]
    pub start: usize,
    /// Byte offset just past the block content.
    #[serde(default)]
    pub end: usize,
}

impl Block {
    /// Creates an inline block with no attributes.
    pub fn inline(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            src: None,
            lang: None,
            attrs: BTreeMap::new(),
            start: 0,
            end: 0,
        }
    }

    /// Creates an external block referring to `src`.
    pub fn external(kind: BlockKind, src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::inline(kind, "")
        }
    }

    /// Returns `true` if the attribute is present and not `false`.
    pub fn has_attr(&self, name: &str) -> bool {
        match self.attrs.get(name) {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::Null) | None => false,
            Some(_) => true,
        }
    }
}

/// The script as prepared by the collaborator's script compiler.
///
/// Without `<script setup>` this is usually the plain script block as-is;
/// with it, the merged output of both script blocks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptBlock {
    /// Compiled script text.
    #[serde(default)]
    pub content: String,
    /// External file reference, relative to the component file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Language tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Whether `<script setup>` took part in producing this script.
    #[serde(default)]
    pub setup: bool,
    /// Map from `content` back to the component file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<serde_json::Value>,
    /// Binding metadata forwarded to template codegen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<serde_json::Value>,
}

/// A parsed component file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    /// The `<template>` block.
    #[serde(default)]
    pub template: Option<Block>,
    /// The plain `<script>` block.
    #[serde(default)]
    pub script: Option<Block>,
    /// The `<script setup>` block.
    #[serde(default)]
    pub script_setup: Option<Block>,
    /// All `<style>` blocks.
    #[serde(default)]
    pub styles: Vec<Block>,

    /// Script compiled for this descriptor, filled on first use.
    #[serde(skip)]
    pub(crate) compiled_script: OnceCell<Option<ScriptBlock>>,
}

impl Descriptor {
    /// Returns `true` if the component has any script block.
    pub fn has_script(&self) -> bool {
        self.script.is_some() || self.script_setup.is_some()
    }

    /// Returns the compiled script, running `compile` only the first time.
    ///
    /// A failed compile is not remembered, so a later call tries again.
    pub fn compiled_script<E>(
        &self,
        compile: impl FnOnce(&Self) -> Result<Option<ScriptBlock>, E>,
    ) -> Result<Option<&ScriptBlock>, E> {
        if let Some(compiled) = self.compiled_script.get() {
            return Ok(compiled.as_ref());
        }
        let compiled = compile(self)?;
        Ok(self.compiled_script.get_or_init(|| compiled).as_ref())
    }

    /// Language of the script that template codegen should assume.
    pub fn script_lang(&self) -> Option<&str> {
        self.script_setup
            .as_ref()
            .and_then(|b| b.lang.as_deref())
            .or_else(|| self.script.as_ref().and_then(|b| b.lang.as_deref()))
    }

    /// Whether the script is TypeScript (`lang="ts"` or `lang="tsx"`).
    pub fn is_typescript(&self) -> bool {
        self.script_lang().is_some_and(|lang| TYPESCRIPT_LANG.is_match(lang))
    }
}

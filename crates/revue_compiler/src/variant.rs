//! The two generations of component compiler.

use revue_common::CompilerVersion;

/// Which generation of compiler the collaborator is.
///
/// Selected once from the collaborator's reported version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompilerVariant {
    /// Major version 2. Render functions are emitted as
    /// `var render = ...; var staticRenderFns = [...]`.
    Legacy,
    /// Major version 3 and later. Render functions are emitted as
    /// `export function render(...)`.
    Modern,
}

impl CompilerVariant {
    /// Picks the variant for a version, or `None` if it is too old.
    pub fn detect(version: &CompilerVersion) -> Option<Self> {
        match version.major() {
            2 => Some(CompilerVariant::Legacy),
            m if m >= 3 => Some(CompilerVariant::Modern),
            _ => None,
        }
    }

    /// Returns `true` if `<script setup>` can be compiled by this version.
    pub fn supports_script_setup(self, version: &CompilerVersion) -> bool {
        match self {
            CompilerVariant::Legacy => version.at_least(2, 7),
            CompilerVariant::Modern => true,
        }
    }
}

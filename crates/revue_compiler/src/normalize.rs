//! Rewrites that put generated code into the configured module format.
//!
//! Every rewrite here maps one line to one line, so source maps computed
//! before normalization stay valid after it.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use revue_config::ModuleFormat;

/// Expression that evaluates to the component options object of a module
/// in dynamic mode, whichever way the script exported it.
pub const COMPONENT_OPTIONS: &str =
    "((module.exports.default || module.exports).options || module.exports.default || module.exports)";

const SETUP_EXPORT: &str = "export default {";
const DEFAULT_EXPORT: &str = "export default ";
const DYNAMIC_EXPORT: &str = "exports = module.exports = ";

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("normalization patterns are valid")
}

static RENDER_FUNCTION: LazyLock<Regex> = LazyLock::new(|| regex(r"render\s*:?\s*\("));
static FUNCTIONAL_OPTION: LazyLock<Regex> = LazyLock::new(|| regex(r"functional\s*:\s*true"));
static HAS_CJS_EXPORT: LazyLock<Regex> = LazyLock::new(|| regex(r"(?:module\.)?exports\s*=\s*"));
static CJS_EXPORT: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?:exports = )?(?:module\.)?exports = "));
static EXPLICIT_NAME: LazyLock<Regex> = LazyLock::new(|| regex(r"\bname: '[\w-]+'"));
static INFERRED_NAME: LazyLock<Regex> = LazyLock::new(|| regex(r"\b__name: '[\w-]+',?"));
static EXPORT_DECL: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\bexport (async function|function|const|let|var|class)\b"));
static NAMED_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"import (\{[\w ,$-]+\}) from (["'][\w./@-]+["']);?"#));
static ASSET_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    regex(r#"import ([\w$-]+) from (["'][\w./@-]+\.(?i:gif|jpg|png|svg)["']);?"#)
});
static DECLARES_RENDER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\b(?:function\s+render\s*\(|(?:var|let|const)\s+render\s*=)"));
static EXPORTS_RENDER: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\bexport\s+(?:function\s+render\s*\(|(?:var|let|const)\s+render\s*=)")
});
static DECLARES_STATIC_FNS: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\b(?:var|let|const)\s+staticRenderFns\s*="));
static EXPORTS_STATIC_FNS: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\bexport\s+(?:var|let|const)\s+staticRenderFns\s*="));

/// Returns `true` if the script defines its own render function.
pub fn has_render_function(script: &str) -> bool {
    RENDER_FUNCTION.is_match(script)
}

/// Returns `true` if the script declares a functional component.
pub fn declares_functional(script: &str) -> bool {
    FUNCTIONAL_OPTION.is_match(script)
}

/// Reconciles the output of a `<script setup>` merge with the plain
/// script's export style.
///
/// - Plain script empty, dynamic mode: the setup default export mutates
///   `module.exports` in place.
/// - Plain script assigning `module.exports`: that object becomes
///   `__default__` and is spread into the setup default export.
///
/// An inferred `__name` field is dropped when an explicit `name` exists.
pub fn merge_setup_script(content: &str, plain_script: &str, format: ModuleFormat) -> String {
    let merged = if plain_script.trim().is_empty() {
        match format {
            ModuleFormat::Dynamic if content.contains(SETUP_EXPORT) => {
                let mut out = content.replacen(
                    SETUP_EXPORT,
                    "/*#__PURE__*/Object.assign(module.exports, {",
                    1,
                );
                out.push_str(");");
                out
            }
            _ => content.to_string(),
        }
    } else if HAS_CJS_EXPORT.is_match(plain_script) && CJS_EXPORT.is_match(content) {
        let spread = match format {
            ModuleFormat::Dynamic => "exports = module.exports = { ...__default__,",
            ModuleFormat::Static => "export default { ...__default__,",
        };
        CJS_EXPORT
            .replace(content, "const __default__ = ")
            .replacen(SETUP_EXPORT, spread, 1)
    } else {
        content.to_string()
    };

    if EXPLICIT_NAME.is_match(&merged) && INFERRED_NAME.is_match(&merged) {
        INFERRED_NAME.replace(&merged, "").into_owned()
    } else {
        merged
    }
}

/// Rewrites a CommonJS default export into `export default`.
pub fn to_static(code: &str) -> String {
    if code.contains(DEFAULT_EXPORT) {
        return code.to_string();
    }
    CJS_EXPORT.replace(code, DEFAULT_EXPORT).into_owned()
}

/// Rewrites static module syntax into `require` calls and `module.exports`
/// assignments.
pub fn to_dynamic(code: &str) -> String {
    let code = EXPORT_DECL.replace_all(code, "${1}");
    let code = ASSET_IMPORT.replace_all(&code, "const ${1} = ''; // ${2}");
    let code = NAMED_IMPORT.replace_all(&code, |caps: &Captures| {
        format!("const {} = require({});", caps[1].replace(" as ", ": "), &caps[2])
    });
    code.replacen(DEFAULT_EXPORT, DYNAMIC_EXPORT, 1)
}

/// Normalizes a portion of generated code for `format`.
pub fn normalize(code: &str, format: ModuleFormat) -> String {
    match format {
        ModuleFormat::Static => to_static(code),
        ModuleFormat::Dynamic => to_dynamic(code),
    }
}

/// Lines attaching template codegen output to the component.
pub fn template_glue(code: &str, format: ModuleFormat, functional: bool) -> Vec<String> {
    let declares_render = DECLARES_RENDER.is_match(code);
    let declares_static = DECLARES_STATIC_FNS.is_match(code);
    match format {
        ModuleFormat::Dynamic => {
            let mut lines = vec![
                format!(";{COMPONENT_OPTIONS}._compiled=true"),
                format!(";{COMPONENT_OPTIONS}.functional={functional}"),
            ];
            if declares_render {
                lines.push(format!(";{COMPONENT_OPTIONS}.render = render"));
            }
            if declares_static {
                lines.push(format!(";{COMPONENT_OPTIONS}.staticRenderFns = staticRenderFns"));
            }
            lines
        }
        ModuleFormat::Static => {
            let mut names = Vec::new();
            if declares_render && !EXPORTS_RENDER.is_match(code) {
                names.push("render");
            }
            if declares_static && !EXPORTS_STATIC_FNS.is_match(code) {
                names.push("staticRenderFns");
            }
            if names.is_empty() {
                Vec::new()
            } else {
                vec![format!("export {{ {} }};", names.join(", "))]
            }
        }
    }
}

/// Lines standing in for codegen when the script has its own render
/// function.
pub fn render_function_glue(format: ModuleFormat, functional: bool) -> Vec<String> {
    match format {
        ModuleFormat::Dynamic => vec![
            format!(";{COMPONENT_OPTIONS}._compiled=false"),
            format!(";{COMPONENT_OPTIONS}.functional={functional}"),
            format!(";{COMPONENT_OPTIONS}.staticRenderFns = []"),
        ],
        ModuleFormat::Static => vec![
            "var staticRenderFns = [];".to_string(),
            "export { staticRenderFns };".to_string(),
        ],
    }
}

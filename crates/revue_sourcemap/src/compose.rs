//! Layout of the script and template maps in the assembled module.

use sourcemap::{SourceMap, SourceMapBuilder};

/// Number of lines the template portion is shifted down by when it follows
/// `script_portion` in the assembled module.
///
/// The two portions are joined with a newline, so a non-empty script of `n`
/// newlines pushes the template down `n + 1` lines. An empty script is left
/// out of the module entirely.
pub fn template_line_offset(script_portion: &str) -> u32 {
    if script_portion.is_empty() {
        return 0;
    }
    script_portion.matches('\n').count() as u32 + 1
}

/// Combines the script map and the template map into one map for the
/// assembled module.
///
/// Template mappings are re-emitted `template_line_offset(script_portion)`
/// lines lower with their original side untouched. For sources both maps
/// embed, the template map's text wins. Returns `None` when neither map is
/// present.
pub fn compose(
    script: Option<SourceMap>,
    template: Option<&SourceMap>,
    script_portion: &str,
) -> Option<SourceMap> {
    let Some(template) = template else {
        return script;
    };
    let offset = template_line_offset(script_portion);
    if script.is_none() && offset == 0 {
        return Some(template.clone());
    }

    let file = script
        .as_ref()
        .and_then(SourceMap::get_file)
        .or(template.get_file());
    let mut builder = SourceMapBuilder::new(file);
    if let Some(script) = &script {
        append(&mut builder, script, 0);
    }
    append(&mut builder, template, offset);
    Some(builder.into_sourcemap())
}

/// Copies every source, text, name and token of `map` into `builder`,
/// `line_offset` generated lines lower.
fn append(builder: &mut SourceMapBuilder, map: &SourceMap, line_offset: u32) {
    let mut source_ids = Vec::new();
    for (idx, source) in map.sources().enumerate() {
        let id = builder.add_source(source);
        if let Some(contents) = map.get_source_contents(idx as u32) {
            builder.set_source_contents(id, Some(contents));
        }
        source_ids.push(id);
    }
    let name_ids: Vec<u32> = map.names().map(|name| builder.add_name(name)).collect();

    for token in map.tokens() {
        builder.add_raw(
            token.get_dst_line() + line_offset,
            token.get_dst_col(),
            token.get_src_line(),
            token.get_src_col(),
            source_ids.get(token.get_src_id() as usize).copied(),
            name_ids.get(token.get_name_id() as usize).copied(),
            false,
        );
    }
}

/// Builds a line-granular identity map for a script read from `file`.
///
/// Every non-blank line `n` maps column 0 to line `n`, column 0 of `file`.
/// Column positions inside a line are not tracked.
pub fn identity_line_map(file: &str, content: &str) -> SourceMap {
    let mut builder = SourceMapBuilder::new(Some(file));
    let src = builder.add_source(file);
    builder.set_source_contents(src, Some(content));
    for (idx, line) in content.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        builder.add_raw(idx as u32, 0, idx as u32, 0, Some(src), None, false);
    }
    builder.into_sourcemap()
}

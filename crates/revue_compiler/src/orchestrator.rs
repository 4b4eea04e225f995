//! One compile of one component file.
//!
//! The stages run in a fixed order:
//!
//! 1. parse the component and report parser errors;
//! 2. resolve the script, reconcile a `<script setup>` merge with the
//!    module format, transpile it, and build its map;
//! 3. run template codegen (or stand in for it when the script has its own
//!    render function) and report codegen errors and tips;
//! 4. lay the template map under the script map;
//! 5. join both portions and append the inline map comment.
//!
//! Rewrites in stages 2 and 3 never add or remove lines, so maps computed
//! before them still line up with the assembled text.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use revue_cache::SfcMetadata;
use revue_common::{to_slash, CompilerVersion};
use revue_config::{Config, ConfigError, ModuleFormat};
use revue_diagnostics::{
    report_diagnostics, Diagnostic, DiagnosticPolicy, DiagnosticRenderer, DiagnosticReporter,
    DiagnosticSink, LineRenderer, TracingReporter,
};
use revue_source::{SourceDb, SourceFile, Span};
use revue_sourcemap::{compose, decode, identity_line_map, merge, to_inline_comment, SourceMap};

use crate::collaborator::{CompilerMessage, SfcCompiler, TemplateRequest, TranspileRequest, Transpiler};
use crate::descriptor::{Descriptor, ScriptBlock};
use crate::error::CompileError;
use crate::normalize;
use crate::resolver::resolve_block;
use crate::variant::CompilerVariant;

/// Settings that shape every compile.
#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    /// Module convention of the generated code.
    pub module_format: ModuleFormat,
    /// Options forwarded with every transpile request.
    pub transpile_options: serde_json::Value,
    /// Which diagnostics are logged.
    pub policy: DiagnosticPolicy,
}

impl CompileOptions {
    /// Derives compile options from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let transpile_options = serde_json::to_value(config.transpile_options()).map_err(|e| {
            ConfigError::InvalidValue {
                key: "transpile.options".to_string(),
                value: e.to_string(),
            }
        })?;
        Ok(Self {
            module_format: config.module_format,
            transpile_options,
            policy: config.diagnostic_policy()?,
        })
    }
}

/// The compiled module and the files it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct CompileOutput {
    /// Module text, ending with the inline map comment when a map exists.
    pub code: String,
    /// Inputs for the cache fingerprint.
    pub metadata: SfcMetadata,
}

/// Output of the script stage.
#[derive(Default)]
struct ScriptPortion {
    code: String,
    map: Option<SourceMap>,
    external_path: Option<PathBuf>,
    has_render_fn: bool,
    functional: bool,
}

/// Output of the template stage.
#[derive(Default)]
struct TemplatePortion {
    code: String,
    map: Option<SourceMap>,
    external_path: Option<PathBuf>,
}

/// Drives the collaborators through one compile.
pub struct Orchestrator {
    compiler: Arc<dyn SfcCompiler>,
    transpiler: Option<Arc<dyn Transpiler>>,
    version: CompilerVersion,
    variant: CompilerVariant,
    options: CompileOptions,
    renderer: Box<dyn DiagnosticRenderer>,
    reporter: Arc<dyn DiagnosticReporter>,
}

impl Orchestrator {
    /// Creates an orchestrator, selecting the compiler variant from the
    /// collaborator's version.
    pub fn new(compiler: Arc<dyn SfcCompiler>, options: CompileOptions) -> Result<Self, CompileError> {
        let reported = compiler.version().to_string();
        let version: CompilerVersion = reported
            .parse()
            .map_err(|_| CompileError::UnsupportedCompiler(reported.clone()))?;
        let variant =
            CompilerVariant::detect(&version).ok_or(CompileError::UnsupportedCompiler(reported))?;
        tracing::debug!(%version, ?variant, "selected compiler variant");
        Ok(Self {
            compiler,
            transpiler: None,
            version,
            variant,
            options,
            renderer: Box::new(LineRenderer::default()),
            reporter: Arc::new(TracingReporter),
        })
    }

    /// Runs every script through `transpiler`.
    pub fn with_transpiler(mut self, transpiler: Arc<dyn Transpiler>) -> Self {
        self.transpiler = Some(transpiler);
        self
    }

    /// Sends diagnostics to `reporter` instead of `tracing`.
    pub fn with_reporter(mut self, reporter: Arc<dyn DiagnosticReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Formats diagnostics with `renderer`.
    pub fn with_renderer(mut self, renderer: Box<dyn DiagnosticRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// The collaborator's version string, as reported.
    pub fn compiler_version(&self) -> &str {
        self.version.as_str()
    }

    /// The selected compiler variant.
    pub fn variant(&self) -> CompilerVariant {
        self.variant
    }

    /// The options this orchestrator compiles with.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles one component file.
    ///
    /// Parser and codegen diagnostics are logged and never fail the compile.
    /// Unreadable external blocks, collaborator failures and unsupported
    /// `<script setup>` usage do.
    pub fn compile(&self, source: &str, filename: &Path) -> Result<CompileOutput, CompileError> {
        tracing::info!(file = %filename.display(), "start compiling");
        let name = filename.to_string_lossy();

        let parsed = self
            .compiler
            .parse(source, &name)
            .map_err(|e| collaborator_error("parse", filename, e))?;
        let descriptor = parsed.descriptor;
        tracing::debug!(file = %filename.display(), ?descriptor, "parsed descriptor");

        let mut db = SourceDb::new();
        let sink = DiagnosticSink::new();
        let component = db.add_source(filename, source.to_string());
        if let Some(file) = db.get_file(component) {
            sink.extend(
                parsed
                    .errors
                    .iter()
                    .map(|m| locate(Diagnostic::parser_error(&m.message), m, file)),
            );
        }
        self.report(filename, &sink, &db);

        log_block("template", descriptor.template.is_some());
        log_block("script", descriptor.script.is_some());
        log_block("script setup", descriptor.script_setup.is_some());
        log_block("style(s)", !descriptor.styles.is_empty());

        if descriptor.script_setup.is_some() && !self.variant.supports_script_setup(&self.version) {
            return Err(CompileError::UnsupportedSetup {
                path: filename.to_path_buf(),
                version: self.version.to_string(),
            });
        }

        let compiled = descriptor
            .compiled_script(|d| self.compiler.compile_script(d, &name))
            .map_err(|e| collaborator_error("compile script of", filename, e))?;
        let script = self.script_portion(&descriptor, compiled, filename)?;
        tracing::info!(
            file = %filename.display(),
            "{} render function",
            if script.has_render_fn { "has" } else { "has no" }
        );

        let template = self.template_portion(&descriptor, compiled, &script, filename, &mut db)?;
        let map = compose(script.map, template.map.as_ref(), &script.code);

        let mut code = [script.code.as_str(), template.code.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if let Some(map) = &map {
            let comment = to_inline_comment(map).map_err(|e| map_error(filename, e))?;
            code.push_str("\n\n");
            code.push_str(&comment);
        }
        code.push('\n');

        tracing::debug!(file = %filename.display(), "compiled component\n{code}");
        tracing::info!(file = %filename.display(), "finished compiling");

        Ok(CompileOutput {
            code,
            metadata: SfcMetadata {
                file_path: filename.to_path_buf(),
                external_script_path: script.external_path,
                external_template_path: template.external_path,
            },
        })
    }

    fn script_portion(
        &self,
        descriptor: &Descriptor,
        compiled: Option<&ScriptBlock>,
        filename: &Path,
    ) -> Result<ScriptPortion, CompileError> {
        let Some(compiled) = compiled else {
            return Ok(ScriptPortion::default());
        };
        let format = self.options.module_format;
        let resolved = resolve_block(compiled, filename)?;
        let has_render_fn = normalize::has_render_function(&resolved.content);
        let functional = normalize::declares_functional(&resolved.content);

        let mut code = if compiled.setup || descriptor.script_setup.is_some() {
            let plain = descriptor.script.as_ref().map_or("", |b| b.content.as_str());
            normalize::merge_setup_script(&resolved.content, plain, format)
        } else {
            resolved.content.clone()
        };

        let script_file = resolved.external_path.as_deref().unwrap_or(filename);
        let mut component_map = parse_map(compiled.map.as_ref(), filename)?;
        let mut transpile_map = None;

        tracing::info!(
            "transpilation is {}",
            if self.transpiler.is_some() { "enabled" } else { "not enabled" }
        );
        match &self.transpiler {
            Some(transpiler) => {
                tracing::info!(file = %script_file.display(), "start transpiling script content");
                let request = TranspileRequest {
                    filename: script_file.to_string_lossy().into_owned(),
                    code,
                    options: self.options.transpile_options.clone(),
                };
                let output = transpiler.transpile(&request).map_err(|source| CompileError::Transpile {
                    path: script_file.to_path_buf(),
                    source,
                })?;
                tracing::info!(file = %script_file.display(), "finished transpiling script content");
                code = output.code;
                transpile_map = parse_map(output.map.as_ref(), filename)?;
            }
            None => {
                if let Some(external) = &resolved.external_path {
                    component_map = Some(identity_line_map(&to_slash(external), &resolved.content));
                }
            }
        }

        let map = match (component_map, transpile_map) {
            (Some(component), Some(transpiled)) => Some(merge(&component, &transpiled)),
            (component, transpiled) => transpiled.or(component),
        };
        tracing::info!(
            "script {} source map",
            if map.is_some() { "has" } else { "has no" }
        );

        Ok(ScriptPortion {
            code: normalize::normalize(&code, format),
            map,
            external_path: resolved.external_path,
            has_render_fn,
            functional,
        })
    }

    fn template_portion(
        &self,
        descriptor: &Descriptor,
        compiled: Option<&ScriptBlock>,
        script: &ScriptPortion,
        filename: &Path,
        db: &mut SourceDb,
    ) -> Result<TemplatePortion, CompileError> {
        let format = self.options.module_format;
        let functional = script.functional
            || descriptor
                .template
                .as_ref()
                .is_some_and(|t| t.has_attr("functional"));
        tracing::info!(
            file = %filename.display(),
            "{} component",
            if functional { "functional" } else { "regular" }
        );

        if script.has_render_fn {
            return Ok(TemplatePortion {
                code: normalize::render_function_glue(format, functional).join("\n"),
                ..Default::default()
            });
        }
        let Some(block) = &descriptor.template else {
            return Ok(TemplatePortion::default());
        };

        let resolved = resolve_block(block, filename)?;
        let template_file = resolved.external_path.as_deref().unwrap_or(filename);
        tracing::debug!(file = %template_file.display(), "template content\n{}", resolved.content);

        let request = TemplateRequest {
            source: resolved.content.clone(),
            filename: template_file.to_string_lossy().into_owned(),
            is_functional: functional,
            is_ts: descriptor.is_typescript(),
            bindings: compiled.and_then(|s| s.bindings.clone()),
        };
        let output = self
            .compiler
            .compile_template(&request)
            .map_err(|e| collaborator_error("compile template of", filename, e))?;
        tracing::debug!(file = %template_file.display(), "compiled template\n{}", output.code);

        let sink = DiagnosticSink::new();
        let template_id = db.add_source(template_file, resolved.content);
        if let Some(file) = db.get_file(template_id) {
            sink.extend(
                output
                    .errors
                    .iter()
                    .map(|m| locate(Diagnostic::template_error(&m.message), m, file)),
            );
            sink.extend(
                output
                    .tips
                    .iter()
                    .map(|m| locate(Diagnostic::template_tip(&m.message), m, file)),
            );
        }
        self.report(template_file, &sink, db);

        let code = match format {
            ModuleFormat::Dynamic => normalize::to_dynamic(&output.code),
            ModuleFormat::Static => output.code,
        };
        let glue = normalize::template_glue(&code, format, functional);
        let code = std::iter::once(code)
            .chain(glue)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(TemplatePortion {
            code,
            map: parse_map(output.map.as_ref(), filename)?,
            external_path: resolved.external_path,
        })
    }

    fn report(&self, file: &Path, sink: &DiagnosticSink, db: &SourceDb) {
        let diagnostics = sink.take_all();
        if diagnostics.is_empty() {
            return;
        }
        report_diagnostics(
            file,
            &diagnostics,
            db,
            &self.options.policy,
            self.renderer.as_ref(),
            self.reporter.as_ref(),
        );
    }
}

fn log_block(kind: &str, present: bool) {
    tracing::info!("{} {kind} block", if present { "has" } else { "has no" });
}

/// Attaches the message's range to `diag`. Collaborator ranges count UTF-16
/// code units; spans count bytes.
fn locate(diag: Diagnostic, message: &CompilerMessage, file: &SourceFile) -> Diagnostic {
    match message.range {
        Some((start, end)) => diag.with_span(Span::new(
            file.id,
            file.byte_offset_from_utf16(start),
            file.byte_offset_from_utf16(end),
        )),
        None => diag,
    }
}

fn parse_map(
    value: Option<&serde_json::Value>,
    filename: &Path,
) -> Result<Option<SourceMap>, CompileError> {
    value
        .map(decode)
        .transpose()
        .map_err(|e| map_error(filename, e))
}

fn map_error(filename: &Path, source: revue_sourcemap::SourceMapError) -> CompileError {
    CompileError::SourceMap {
        path: filename.to_path_buf(),
        source,
    }
}

fn collaborator_error(
    action: &'static str,
    filename: &Path,
    source: crate::bridge::BridgeError,
) -> CompileError {
    CompileError::Collaborator {
        action,
        path: filename.to_path_buf(),
        source,
    }
}

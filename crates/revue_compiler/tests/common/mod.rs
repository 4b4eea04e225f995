//! Shared fixtures for the pipeline tests: a regex-driven fake component
//! compiler and a temporary project directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::time::{Duration, SystemTime};

use regex::Regex;
use revue_compiler::{
    Block, BlockKind, BridgeError, CompileHook, CompileOptions, CompilerMessage, Descriptor,
    Orchestrator, ParseOutput, ScriptBlock, SfcCompiler, TemplateOutput, TemplateRequest,
};
use revue_config::ModuleFormat;
use revue_diagnostics::CollectingReporter;
use revue_sourcemap::{encode, SourceMapBuilder};

/// A component compiler good enough to split simple component files.
pub struct FakeCompiler {
    pub version: String,
    /// Attach a `(3,0) -> (3,0)` map to compiled scripts.
    pub script_map: bool,
    pub parses: AtomicUsize,
    pub script_compiles: AtomicUsize,
    pub codegens: AtomicUsize,
    /// When set, `parse` compiles `Nested.vue` through this hook.
    pub reenter: OnceLock<Weak<CompileHook>>,
    pub nested_results: Mutex<Vec<String>>,
    template_line: Mutex<u32>,
}

impl FakeCompiler {
    pub fn new(version: &str) -> Arc<Self> {
        Arc::new(Self {
            version: version.to_string(),
            script_map: false,
            parses: AtomicUsize::new(0),
            script_compiles: AtomicUsize::new(0),
            codegens: AtomicUsize::new(0),
            reenter: OnceLock::new(),
            nested_results: Mutex::new(Vec::new()),
            template_line: Mutex::new(1),
        })
    }

    pub fn with_script_map(version: &str) -> Arc<Self> {
        let mut fake = Self::new(version);
        if let Some(inner) = Arc::get_mut(&mut fake) {
            inner.script_map = true;
        }
        fake
    }

    pub fn codegen_count(&self) -> usize {
        self.codegens.load(Ordering::SeqCst)
    }

    fn is_legacy(&self) -> bool {
        self.version.starts_with("2.")
    }
}

fn block(kind: BlockKind, attrs: &str, content: &str, start: usize) -> Block {
    let attr_re = Regex::new(r#"([\w-]+)(?:="([^"]*)")?"#).unwrap();
    let mut block = Block::inline(kind, content);
    block.start = start;
    block.end = start + content.len();
    for caps in attr_re.captures_iter(attrs) {
        let name = caps[1].to_string();
        let value = caps
            .get(2)
            .map_or(serde_json::Value::Bool(true), |v| v.as_str().into());
        match name.as_str() {
            "src" => {
                block.src = value.as_str().map(str::to_string);
                block.content.clear();
            }
            "lang" => block.lang = value.as_str().map(str::to_string),
            _ => {}
        }
        block.attrs.insert(name, value);
    }
    block
}

fn unmatched_end_tags(content: &str, offset: usize) -> Vec<CompilerMessage> {
    let close_re = Regex::new(r"</([a-z]+)>").unwrap();
    let mut errors = Vec::new();
    let mut seen = Vec::new();
    for m in close_re.captures_iter(content) {
        let name = m[1].to_string();
        if seen.contains(&name) {
            continue;
        }
        let opens = content.matches(&format!("<{name}")).count();
        let closes = content.matches(&format!("</{name}>")).count();
        if closes > opens {
            let whole = m.get(0).unwrap();
            errors.push(CompilerMessage::at(
                "Invalid end tag.",
                offset + whole.start(),
                offset + whole.end(),
            ));
        }
        seen.push(name);
    }
    errors
}

impl SfcCompiler for FakeCompiler {
    fn version(&self) -> &str {
        &self.version
    }

    fn parse(&self, source: &str, _filename: &str) -> Result<ParseOutput, BridgeError> {
        self.parses.fetch_add(1, Ordering::SeqCst);
        if let Some(hook) = self.reenter.get().and_then(Weak::upgrade) {
            let nested = hook
                .hook("<template><p/></template>", Path::new("Nested.vue"))
                .unwrap();
            self.nested_results.lock().unwrap().push(nested);
        }

        let mut descriptor = Descriptor::default();
        let mut errors = Vec::new();

        let template_re = Regex::new(r"(?s)<template([^>]*)>(.*)</template>").unwrap();
        if let Some(caps) = template_re.captures(source) {
            let content = caps.get(2).unwrap();
            *self.template_line.lock().unwrap() =
                source[..content.start()].matches('\n').count() as u32 + 1;
            errors.extend(unmatched_end_tags(content.as_str(), content.start()));
            descriptor.template = Some(block(
                BlockKind::Template,
                &caps[1],
                content.as_str(),
                content.start(),
            ));
        }

        let script_re = Regex::new(r"(?s)<script([^>]*)>(.*?)</script>").unwrap();
        for caps in script_re.captures_iter(source) {
            let content = caps.get(2).unwrap();
            let script = block(BlockKind::Script, &caps[1], content.as_str(), content.start());
            if script.has_attr("setup") {
                descriptor.script_setup = Some(script);
            } else {
                descriptor.script = Some(script);
            }
        }

        Ok(ParseOutput { descriptor, errors })
    }

    fn compile_script(
        &self,
        descriptor: &Descriptor,
        filename: &str,
    ) -> Result<Option<ScriptBlock>, BridgeError> {
        self.script_compiles.fetch_add(1, Ordering::SeqCst);
        if let Some(setup) = &descriptor.script_setup {
            let plain = descriptor
                .script
                .as_ref()
                .map(|b| format!("{}\n", b.content))
                .unwrap_or_default();
            let content = format!(
                "{plain}export default {{\n  __name: 'component',\n  setup(__props) {{\n{}\n    return {{}}\n  }}\n}}\n",
                setup.content
            );
            return Ok(Some(ScriptBlock {
                content,
                lang: setup.lang.clone(),
                setup: true,
                bindings: Some(serde_json::json!({})),
                ..Default::default()
            }));
        }
        let Some(script) = &descriptor.script else {
            return Ok(None);
        };
        let map = self.script_map.then(|| {
            let mut builder = SourceMapBuilder::new(Some(filename));
            let src = builder.add_source(filename);
            builder.add_raw(2, 0, 2, 0, Some(src), None, false);
            encode(&builder.into_sourcemap()).unwrap()
        });
        Ok(Some(ScriptBlock {
            content: script.content.clone(),
            src: script.src.clone(),
            lang: script.lang.clone(),
            setup: false,
            map,
            bindings: None,
        }))
    }

    fn compile_template(&self, request: &TemplateRequest) -> Result<TemplateOutput, BridgeError> {
        self.codegens.fetch_add(1, Ordering::SeqCst);
        let code = if self.is_legacy() {
            "var render = function () {\n  return null\n}\nvar staticRenderFns = []".to_string()
        } else {
            "import { openBlock as _openBlock } from \"vue\"\n\nexport function render(_ctx, _cache) {\n  return (_openBlock(), null)\n}".to_string()
        };
        let line = *self.template_line.lock().unwrap();
        let mut builder = SourceMapBuilder::new(Some(&request.filename));
        let src = builder.add_source(&request.filename);
        builder.set_source_contents(src, Some(&request.source));
        builder.add_raw(0, 0, line - 1, 0, Some(src), None, false);
        Ok(TemplateOutput {
            code,
            map: Some(encode(&builder.into_sourcemap()).unwrap()),
            errors: Vec::new(),
            tips: Vec::new(),
        })
    }
}

/// A temporary project directory.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root().join("node_modules/.cache/revue")
    }

    pub fn write(&self, rel: &str, content: &str, mtime_secs: u64) -> PathBuf {
        let path = self.root().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        self.touch(&path, mtime_secs);
        path
    }

    pub fn touch(&self, path: &Path, mtime_secs: u64) {
        self.touch_at(path, Duration::from_secs(mtime_secs));
    }

    /// Sets the modification time with full precision.
    pub fn touch_at(&self, path: &Path, since_epoch: Duration) {
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + since_epoch).unwrap();
    }
}

pub fn orchestrator(compiler: Arc<FakeCompiler>, format: ModuleFormat) -> Orchestrator {
    let options = CompileOptions {
        module_format: format,
        ..Default::default()
    };
    Orchestrator::new(compiler, options).unwrap()
}

pub fn quiet_orchestrator(
    compiler: Arc<FakeCompiler>,
    format: ModuleFormat,
) -> (Orchestrator, Arc<CollectingReporter>) {
    let reporter = Arc::new(CollectingReporter::new());
    let orchestrator = orchestrator(compiler, format).with_reporter(reporter.clone());
    (orchestrator, reporter)
}

pub fn cached_hook(compiler: Arc<FakeCompiler>, project: &Project) -> CompileHook {
    CompileHook::new(orchestrator(compiler, ModuleFormat::Dynamic))
        .with_cache(project.root(), project.cache_dir())
}

pub fn compile_file(hook: &CompileHook, path: &Path) -> String {
    let source = std::fs::read_to_string(path).unwrap();
    hook.hook(&source, path).unwrap()
}

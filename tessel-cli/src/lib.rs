use anyhow::{Context as _, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tessel_core::{Context, Value};
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbosity`.
pub fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Parse a `NAME=VALUE` command-line binding.
pub fn parse_var(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{s}`")),
    }
}

/// Build the render context from an optional JSON object file plus
/// `--var` bindings, which take precedence.
pub fn load_context(json: Option<&Path>, vars: &[(String, String)]) -> Result<Context> {
    let mut ctx = Context::new();

    if let Some(path) = json {
        let src = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed: serde_json::Value = serde_json::from_str(&src)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let serde_json::Value::Object(map) = parsed else {
            anyhow::bail!("{}: context must be a JSON object", path.display());
        };
        ctx.extend(map);
    }

    for (name, value) in vars {
        if ctx.put(name.as_str(), Value::from(value.as_str())).is_some() {
            tracing::debug!(%name, "--var overrides context file entry");
        }
    }
    Ok(ctx)
}

/// Render `template` to `out`, or stdout when `out` is `None`.
pub fn render_cmd(
    template: &Path,
    json: Option<&Path>,
    vars: &[(String, String)],
    out: Option<&Path>,
) -> Result<()> {
    let doc = tessel_markup::parse_file(template)
        .with_context(|| format!("failed to parse {}", template.display()))?;
    let mut ctx = load_context(json, vars)?;

    let mut sink: Box<dyn Write> = match out {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create {}", dir.display()))?;
            }
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    tessel_renderer::render(&doc, &mut ctx, &mut sink)
        .with_context(|| format!("failed to render {}", template.display()))?;

    if let Some(path) = out {
        tracing::info!(path = %path.display(), "wrote output");
    }
    Ok(())
}

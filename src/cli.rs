use crate::{
    chunk_plan::ChunkPlan,
    config::Config,
    languages::{SUPPORTED_LANGUAGES, parse_language_list},
    pipeline::{Translator, analyze},
    provider,
    report::{self, AnalysisReport},
    source::SourceDocument,
    summarize::summarize,
    translation::TranslationOutcome,
    util::{ensure_dir, hash_file, job_id, now_rfc3339},
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "bid-insight")]
#[command(about = "Procurement document insight: section rules, extractive summary, chunked translation")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./bid-insight.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported target languages.
    Languages {},
    Analyze {
        #[arg(long)]
        input: PathBuf,
    },
    Summarize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        sentences: Option<usize>,
    },
    /// Show how each page would be chunked for translation.
    Plan {
        #[arg(long)]
        input: PathBuf,
    },
    Translate {
        #[arg(long)]
        input: PathBuf,
        /// Comma-separated language codes; defaults to translation.languages.
        #[arg(long)]
        lang: Option<String>,
    },
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        lang: Option<String>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = match resolve_config_path(args.config.as_deref()) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    match &args.cmd {
        Command::Run {
            input,
            lang,
            out_dir,
        } => run(&args, &cfg, input, lang.as_deref(), out_dir.as_deref()),
        cmd => {
            let log_path = resolve_log_path(&cfg, None);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            inspect(&cfg, cmd)
        }
    }
}

fn inspect(cfg: &Config, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Languages {} => print_json(&SUPPORTED_LANGUAGES),
        Command::Analyze { input } => {
            let doc = SourceDocument::load(cfg, input)?;
            print_json(&analyze(cfg, &doc)?)
        }
        Command::Summarize { input, sentences } => {
            let doc = SourceDocument::load(cfg, input)?;
            let n = sentences.unwrap_or(cfg.analysis.summary_sentences);
            println!("{}", summarize(&doc.full_text(), n));
            Ok(())
        }
        Command::Plan { input } => {
            let doc = SourceDocument::load(cfg, input)?;
            let plan = ChunkPlan::from_pages(cfg.translation.effective_chunking(), &doc.pages);
            print_json(&plan)
        }
        Command::Translate { input, lang } => {
            let doc = SourceDocument::load(cfg, input)?;
            let codes = requested_languages(cfg, lang.as_deref())?;
            let outcome = translate(cfg, &doc, &codes)?;
            print_json(&serde_json::json!({
                "translations": outcome.results.iter().map(|r| serde_json::json!({
                    "language_code": r.language_code,
                    "language_name": r.language_name,
                    "pages": r.pages,
                    "full_text": r.full_text(),
                    "word_count": r.word_count(),
                    "character_count": r.character_count(),
                })).collect::<Vec<_>>(),
                "failures": failures_json(&outcome),
            }))?;
            ensure_complete(&outcome)
        }
        Command::Run { input, .. } => Err(anyhow!("run must go through dispatch: {}", input.display())),
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from("bid-insight.toml");
    default.exists().then_some(default)
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries command output; logs go to stderr
    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn requested_languages(cfg: &Config, raw: Option<&str>) -> Result<Vec<String>> {
    let codes = match raw {
        Some(raw) => parse_language_list(raw),
        None => parse_language_list(&cfg.translation.languages.join(",")),
    };
    if codes.is_empty() {
        return Err(anyhow!(
            "at least one target language is required (--lang or translation.languages)"
        ));
    }
    Ok(codes)
}

fn translate(cfg: &Config, doc: &SourceDocument, codes: &[String]) -> Result<TranslationOutcome> {
    // unsupported codes must fail before the provider is even built
    crate::languages::resolve_all(codes)?;
    let provider = provider::from_config(&cfg.translation)?;
    let translator = Translator::new(cfg, provider);
    Ok(translator.translate(doc, codes)?)
}

fn failures_json(outcome: &TranslationOutcome) -> Vec<serde_json::Value> {
    outcome
        .failures
        .iter()
        .map(|f| {
            serde_json::json!({
                "language_code": f.language_code,
                "error": f.source.to_string(),
            })
        })
        .collect()
}

fn ensure_complete(outcome: &TranslationOutcome) -> Result<()> {
    if outcome.is_complete() {
        return Ok(());
    }
    let failed: Vec<&str> = outcome
        .failures
        .iter()
        .map(|f| f.language_code.as_str())
        .collect();
    Err(anyhow!(
        "{} of {} languages failed: {}",
        failed.len(),
        failed.len() + outcome.results.len(),
        failed.join(",")
    ))
}

fn run(
    args: &Args,
    cfg: &Config,
    input: &Path,
    lang: Option<&str>,
    out_override: Option<&Path>,
) -> Result<()> {
    let doc = SourceDocument::load(cfg, input)?;

    let codes = match lang {
        Some(raw) => parse_language_list(raw),
        None => parse_language_list(&cfg.translation.languages.join(",")),
    };

    let input_hash =
        hash_file(input).with_context(|| format!("hashing input: {}", input.display()))?;
    let job_id = job_id(&cfg.normalized_for_hash(), &input_hash);

    let out_root = out_override
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.paths.out_dir));
    let job_dir = out_root.join(&job_id);

    if job_dir.exists() && !cfg.global.resume {
        return Err(anyhow!(
            "job_dir already exists and resume=false: {}",
            job_dir.display()
        ));
    }

    ensure_dir(&job_dir)?;
    ensure_dir(&job_dir.join("logs"))?;

    let log_path = resolve_log_path(cfg, Some(&job_dir));
    let _guard = init_logging(args, cfg, log_path.as_deref())?;

    info!("job_id={job_id} out={}", job_dir.display());

    let started = now_rfc3339();
    let analysis = analyze(cfg, &doc)?;
    let report = AnalysisReport {
        document_name: doc.name.clone(),
        generated_at: started.clone(),
        page_count: doc.pages.len(),
        analysis,
        rules: cfg.rules.clone(),
    };

    if cfg.output.write_report_json {
        std::fs::write(
            job_dir.join(&cfg.output.report_filename),
            serde_json::to_string_pretty(&report)?,
        )?;
    }
    if cfg.output.write_report_markdown {
        std::fs::write(
            job_dir.join(&cfg.output.markdown_filename),
            report::render_analysis_markdown(&report),
        )?;
    }

    let outcome = if codes.is_empty() {
        None
    } else {
        Some(translate(cfg, &doc, &codes)?)
    };

    if let Some(outcome) = &outcome {
        if cfg.output.write_translations {
            let dir = job_dir.join("translations");
            ensure_dir(&dir)?;
            for r in &outcome.results {
                let name = report::translation_filename(&doc.name, &r.language_code);
                std::fs::write(
                    dir.join(name),
                    report::render_translation_markdown(&doc.name, r),
                )?;
            }
            let manifest = report::build_manifest(&doc.name, &now_rfc3339(), outcome);
            std::fs::write(
                dir.join(&cfg.output.manifest_filename),
                serde_json::to_string_pretty(&manifest)?,
            )?;
        }
    }

    if cfg.output.write_index_json {
        let index = serde_json::json!({
            "job_id": job_id,
            "job_name": cfg.global.job_name,
            "started": started,
            "finished": now_rfc3339(),
            "report": cfg.output.report_filename,
            "report_markdown": cfg.output.markdown_filename,
            "languages": codes,
        });
        std::fs::write(job_dir.join("index.json"), serde_json::to_string_pretty(&index)?)?;
    }

    if cfg.global.print_summary {
        print_json(&serde_json::json!({
            "job_id": job_id,
            "job_dir": job_dir,
            "sections": report.analysis.sections.keys().collect::<Vec<_>>(),
            "failures": outcome.as_ref().map(failures_json).unwrap_or_default(),
            "status": if outcome.as_ref().is_none_or(TranslationOutcome::is_complete) { "ok" } else { "partial" },
        }))?;
    }

    match &outcome {
        Some(outcome) => ensure_complete(outcome),
        None => Ok(()),
    }
}

fn resolve_log_path(cfg: &Config, job_dir: Option<&Path>) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    job_dir.map(|d| d.join("logs").join("bid-insight.log"))
}

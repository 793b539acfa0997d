//! booklet-gen CLI - lay out funeral plans and block lists as PDF or DOCX

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use booklet_gen::layout::{PageFlowEngine, StandardChrome};
use booklet_gen::{
    blocks_from_json, docx, ContentBlock, DocumentKind, FuneralPlan, Info, PageGeometry,
};

#[derive(Parser)]
#[command(name = "booklet-gen")]
#[command(version)]
#[command(about = "Lay out funeral plans, checklists and booklets as PDF or DOCX", long_about = None)]
struct Cli {
    /// Log page breaks and other layout decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a funeral plan
    Render {
        /// Plan file (JSON)
        #[arg(value_name = "PLAN")]
        plan: PathBuf,

        /// Which document to print
        #[arg(short, long, value_enum, default_value = "flyer")]
        kind: Kind,

        #[arg(short, long, value_enum, default_value = "pdf")]
        format: Format,

        /// Page geometry (TOML); A4 if not specified
        #[arg(short, long, value_name = "FILE")]
        geometry: Option<PathBuf>,

        /// Text drawn diagonally behind every page
        #[arg(long)]
        watermark: Option<String>,

        /// Fail instead of producing more than this many pages
        #[arg(long, value_name = "N")]
        page_limit: Option<usize>,

        /// Output file; named after the document kind if not specified
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Lay out a raw list of content blocks
    Blocks {
        /// Block list (JSON array)
        #[arg(value_name = "BLOCKS")]
        input: PathBuf,

        /// Title printed in the page header
        #[arg(short, long, default_value = "Document")]
        title: String,

        #[arg(short, long, value_enum, default_value = "pdf")]
        format: Format,

        /// Page geometry (TOML); A4 if not specified
        #[arg(short, long, value_name = "FILE")]
        geometry: Option<PathBuf>,

        /// Output file; next to the input if not specified
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the default page geometry as TOML
    Geometry,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Flyer,
    Checklist,
    Booklet,
}

impl From<Kind> for DocumentKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Flyer => DocumentKind::Flyer,
            Kind::Checklist => DocumentKind::Checklist,
            Kind::Booklet => DocumentKind::Booklet,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pdf,
    Docx,
}

impl Format {
    fn extension(&self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Docx => "docx",
        }
    }
}

/// Everything needed to write one document
struct Export<'a> {
    blocks: &'a [ContentBlock],
    title: &'a str,
    geometry: PageGeometry,
    chrome: StandardChrome,
    page_limit: Option<usize>,
    format: Format,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Export failed: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Render {
            plan,
            kind,
            format,
            geometry,
            watermark,
            page_limit,
            output,
        } => {
            let json = fs::read_to_string(&plan)
                .with_context(|| format!("cannot read plan {}", plan.display()))?;
            let plan = FuneralPlan::from_json(&json)
                .with_context(|| format!("cannot parse plan {}", plan.display()))?;
            let kind = DocumentKind::from(kind);
            let geometry = load_geometry(geometry.as_deref())?;

            let title = plan.document_title(kind);
            let blocks = plan.blocks(kind);
            let mut chrome = StandardChrome::new(&geometry, title.as_str());
            if let Some(church) = &plan.church {
                chrome = chrome.with_footer(church.as_str());
            }
            if let Some(watermark) = watermark {
                chrome = chrome.with_watermark(watermark);
            }

            let output = output.unwrap_or_else(|| {
                PathBuf::from(format!("{}.{}", kind.file_stem(), format.extension()))
            });
            Export {
                blocks: &blocks,
                title: &title,
                geometry,
                chrome,
                page_limit,
                format,
            }
            .write(&output)
        }
        Commands::Blocks {
            input,
            title,
            format,
            geometry,
            output,
        } => {
            let json = fs::read_to_string(&input)
                .with_context(|| format!("cannot read blocks {}", input.display()))?;
            let blocks = blocks_from_json(&json)
                .with_context(|| format!("cannot parse blocks {}", input.display()))?;
            let geometry = load_geometry(geometry.as_deref())?;
            let chrome = StandardChrome::new(&geometry, title.as_str());

            let output = output.unwrap_or_else(|| input.with_extension(format.extension()));
            if output == input {
                anyhow::bail!("refusing to overwrite the input file {}", input.display());
            }
            Export {
                blocks: &blocks,
                title: &title,
                geometry,
                chrome,
                page_limit: None,
                format,
            }
            .write(&output)
        }
        Commands::Geometry => {
            print!("{}", PageGeometry::a4().to_toml_string()?);
            Ok(())
        }
    }
}

fn load_geometry(path: Option<&Path>) -> anyhow::Result<PageGeometry> {
    match path {
        Some(path) => PageGeometry::from_toml_file(path)
            .with_context(|| format!("cannot load geometry {}", path.display())),
        None => Ok(PageGeometry::a4()),
    }
}

impl Export<'_> {
    fn write(self, output: &Path) -> anyhow::Result<()> {
        match self.format {
            Format::Pdf => {
                let mut engine = PageFlowEngine::new(self.geometry)?;
                if let Some(limit) = self.page_limit {
                    engine = engine.with_page_limit(limit);
                }
                let mut document = engine.layout(self.blocks, &self.chrome)?;
                let mut info = Info::new();
                info.title(self.title).subject("Funeral service plan");
                document.set_info(info);

                let file = File::create(output)
                    .with_context(|| format!("cannot create {}", output.display()))?;
                document.write(BufWriter::new(file))?;
                log::info!(
                    "wrote {} page(s) to {}",
                    document.page_count(),
                    output.display()
                );
            }
            Format::Docx => {
                let file = File::create(output)
                    .with_context(|| format!("cannot create {}", output.display()))?;
                let writer = BufWriter::new(file);
                docx::write_docx(self.blocks, self.title, &self.geometry, writer)?;
                log::info!("wrote {}", output.display());
            }
        }
        Ok(())
    }
}

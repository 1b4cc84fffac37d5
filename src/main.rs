use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use resume_pdf::content::AUTHORED_BREAK;
use resume_pdf::layout::PaginationPolicy;
use resume_pdf::{FontConfig, RenderOptions, trace_resume, write_resume_pdf};

const FONTS_ENV: &str = "RESUME_PDF_FONTS";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Pagination {
    /// Start a new page when the next block does not fit
    RemainingSpace,
    /// Break once, at the authored point in the projects section
    Fixed,
    /// Keep everything on one page
    Never,
}

impl From<Pagination> for PaginationPolicy {
    fn from(p: Pagination) -> Self {
        match p {
            Pagination::RemainingSpace => PaginationPolicy::RemainingSpace,
            Pagination::Fixed => PaginationPolicy::FixedBreak(AUTHORED_BREAK),
            Pagination::Never => PaginationPolicy::Never,
        }
    }
}

#[derive(Parser)]
#[command(name = "resume-pdf")]
#[command(version)]
#[command(about = "Lay out the résumé as an A4 PDF", long_about = None)]
struct Cli {
    /// Output PDF file
    #[arg(short, long, value_name = "FILE", default_value = "final_resume.pdf")]
    output: PathBuf,

    /// Directory holding NotoSansSC-Regular.ttf and NotoSansSC-Bold.ttf
    #[arg(long, value_name = "DIR", env = FONTS_ENV, default_value = "fonts/static")]
    fonts_dir: PathBuf,

    /// Use the PDF standard Helvetica faces; overrides --fonts-dir
    #[arg(long)]
    builtin_fonts: bool,

    /// Portrait photo (JPEG or PNG)
    #[arg(long, value_name = "FILE", default_value = "photo.jpg")]
    photo: PathBuf,

    #[arg(long, value_enum, default_value = "remaining-space")]
    pagination: Pagination,

    /// Print the drawing calls instead of writing a PDF
    #[arg(long)]
    trace: bool,

    /// Log layout decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let fonts = if cli.builtin_fonts {
        FontConfig::Builtin
    } else {
        FontConfig::from_dir(&cli.fonts_dir)
    };
    let options = RenderOptions {
        fonts,
        photo: cli.photo,
        pagination: cli.pagination.into(),
        ..RenderOptions::default()
    };

    let result = if cli.trace {
        trace_resume(&options).map(|primitives| {
            for p in primitives {
                println!("{p}");
            }
        })
    } else {
        write_resume_pdf(&cli.output, &options)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

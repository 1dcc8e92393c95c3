use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reviewcard", version)]
struct Cli {
    /// Log progress and chosen layout details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every card of a job as PNG files.
    Render(RenderArgs),
    /// Print the paginated caption of a job without rendering.
    Pages(PagesArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Job JSON file.
    #[arg(long)]
    job: PathBuf,

    /// Output directory for the PNG files.
    #[arg(long)]
    out: PathBuf,

    /// Render cards in parallel, overriding the job's threading settings.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for parallel rendering.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PagesArgs {
    /// Job JSON file.
    #[arg(long)]
    job: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Pages(args) => cmd_pages(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut job = reviewcard::CardJob::from_path(&args.job)?;
    if args.parallel {
        job.threading.parallel = true;
    }
    if args.threads.is_some() {
        job.threading.threads = args.threads;
    }

    let written = job.run(&args.out)?;
    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_pages(args: PagesArgs) -> anyhow::Result<()> {
    let job = reviewcard::CardJob::from_path(&args.job)?;
    let fonts = job.load_fonts()?;
    let mut engine = reviewcard::TextLayoutEngine::new();
    let fit = job.caption(&fonts, &mut engine)?;

    println!(
        "body_font_size={} line_height={} max_lines={} pages={}",
        fit.metrics.body_font_size,
        fit.metrics.line_height,
        fit.caption_box.max_lines,
        fit.pages.len()
    );
    for (i, page) in fit.pages.iter().enumerate() {
        println!("--- page {} ---", i + 1);
        for line in &page.lines {
            println!("{line}");
        }
    }
    Ok(())
}

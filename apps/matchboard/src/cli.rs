use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use matchboard::client::{HttpMatchService, MatchService};
use matchboard::config::Config;
use matchboard::files::ResumeFile;
use matchboard::flows::{
    preview_resume, recommend_jobs, run_single_match, BatchSubmissionController,
    SingleMatchRequest, DEFAULT_TOP_K,
};
use matchboard::models::JobSpec;
use matchboard::render::{
    BoardView, DetailView, MatchReportView, RecommendationsView, SelectionView,
};

#[derive(Parser, Debug)]
#[command(
    name = "matchboard",
    about = "Match résumés against job descriptions and rank candidates",
    version
)]
pub(crate) struct Cli {
    /// Override the configured matching service URL
    #[arg(long, global = true)]
    service_url: Option<String>,
    /// Print structured output as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match one résumé against one job
    Match(MatchArgs),
    /// Rank a batch of résumés against one job
    Rank(RankArgs),
    /// Show the text extracted from a résumé
    Preview {
        #[arg(long)]
        resume: PathBuf,
    },
    /// Recommend stored jobs for a candidate
    Recommend {
        #[arg(long)]
        candidate_id: i64,
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top: usize,
    },
    /// Check that the matching service is up
    Health,
}

#[derive(Args, Debug)]
struct JobArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// Comma-separated required skills
    #[arg(long, default_value = "")]
    skills: String,
}

#[derive(Args, Debug)]
struct MatchArgs {
    #[command(flatten)]
    job: JobArgs,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    resume: PathBuf,
}

#[derive(Args, Debug)]
struct RankArgs {
    #[command(flatten)]
    job: JobArgs,
    /// Résumé files (.pdf or .txt), at most 100
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Show the detail panel for this rank (1-based); repeatable
    #[arg(long = "detail")]
    details: Vec<usize>,
}

pub(crate) fn parse() -> Cli {
    Cli::parse()
}

impl Cli {
    pub(crate) fn service_url(&self) -> Option<String> {
        self.service_url.clone()
    }
}

pub(crate) async fn run(cli: Cli, config: Config) -> Result<()> {
    let service = HttpMatchService::new(&config.service_url, config.request_timeout)
        .context("failed to build HTTP client")?;
    info!("Using matching service at {}", service.base_url());

    match cli.command {
        Command::Match(args) => {
            let request = SingleMatchRequest {
                title: args.job.title,
                description: args.job.description,
                required_skills: args.job.skills,
                name: args.name,
                email: args.email,
                resume: Some(read_file(&args.resume).await?),
            };
            let report = run_single_match(&service, request, config.skill_policy).await?;
            emit(cli.json, &report, MatchReportView(&report))
        }
        Command::Rank(args) => rank(&service, args, &config, cli.json).await,
        Command::Preview { resume } => {
            let file = read_file(&resume).await?;
            let text = preview_resume(&service, &file).await?;
            emit(
                cli.json,
                &json!({ "file": file.name, "text": text }),
                format!("{text}\n"),
            )
        }
        Command::Recommend { candidate_id, top } => {
            let jobs = recommend_jobs(&service, candidate_id, top).await?;
            emit(cli.json, &jobs, RecommendationsView(&jobs))
        }
        Command::Health => {
            let health = service.health().await?;
            emit(
                cli.json,
                &json!({ "status": health.status }),
                format!("{}\n", health.status),
            )
        }
    }
}

async fn rank(
    service: &dyn MatchService,
    args: RankArgs,
    config: &Config,
    as_json: bool,
) -> Result<()> {
    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        files.push(read_file(path).await?);
    }

    let mut controller = BatchSubmissionController::default();
    controller.select_files(files)?;
    if !as_json {
        print!("{}", SelectionView(&controller.selection_summary()));
    }

    let job = JobSpec::from_form(&args.job.title, &args.job.description, &args.job.skills);
    let snapshot = controller.submit(service, &job).await?;

    let mut details = Vec::with_capacity(args.details.len());
    for rank in args.details {
        let index = rank
            .checked_sub(1)
            .with_context(|| format!("ranks start at 1, got {rank}"))?;
        details.push(
            controller
                .slot()
                .detail(snapshot.id(), index, config.skill_policy)?,
        );
    }

    if as_json {
        let body = json!({
            "snapshot_id": snapshot.id(),
            "created_at": snapshot.created_at(),
            "board": snapshot.board(),
            "details": details,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    print!("{}", BoardView(snapshot.board()));
    for detail in &details {
        println!();
        print!("{}", DetailView(detail));
    }
    Ok(())
}

async fn read_file(path: &Path) -> Result<ResumeFile> {
    ResumeFile::from_path(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

fn emit<T: Serialize>(as_json: bool, value: &T, text: impl std::fmt::Display) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{text}");
    }
    Ok(())
}

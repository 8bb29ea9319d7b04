use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use dealflow::config::{Settings, Theme};
use dealflow::core::{run_upload, DealAnalysis, DealFilterSort, UploadSummary};
use dealflow::error::AppError;
use dealflow::models::{
    match_range_label, DealListResponse, FavoriteResponse, FilterConfig, MatchRange,
    ReviewStatus, SortConfig, SortDirection, SortField, Stage, UploadResponse, HIGH_MATCH_PRESET,
};
use dealflow::output::{
    render_analysis, render_deal_table, render_json, render_presets, render_upload_step,
    render_upload_summary, RenderContext,
};
use dealflow::services::DealBook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "dealflow",
    about = "Review, score and filter a venture deal pipeline",
    version
)]
pub(crate) struct Cli {
    /// Configuration file (defaults to config/default.toml + config/local.toml)
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,
    /// JSON file holding an array of deals (defaults to the built-in sample)
    #[arg(short, long, global = true)]
    pub(crate) data: Option<PathBuf>,
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
    /// Override the configured display theme
    #[arg(long, global = true, value_enum)]
    pub(crate) theme: Option<ThemeArg>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// List deals after applying filters, search and sort
    List(ListArgs),
    /// Show the metric breakdown and recommendation for one deal
    Analyze {
        id: String,
    },
    /// Toggle a deal's favorite flag and print the resulting favorites
    ///
    /// Nothing is saved; use `list --toggle-favorite <ID>` to filter on the result.
    Favorite {
        id: String,
    },
    /// Run a pitch deck through the upload and scoring steps
    Upload(UploadArgs),
    /// List the match-range presets offered by the filter bar
    Presets,
    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Lowest match score to include
    #[arg(long, default_value_t = 0)]
    pub(crate) min: u8,
    /// Highest match score to include
    #[arg(long, default_value_t = 100)]
    pub(crate) max: u8,
    /// Shortcut for the "High Match (90%+)" quick filter
    #[arg(long, conflicts_with_all = ["min", "max"])]
    pub(crate) high_match: bool,
    /// Accepted stage, repeatable (e.g. --stage Seed --stage "Series A")
    #[arg(long = "stage")]
    pub(crate) stages: Vec<String>,
    /// Accepted pre-VC status, repeatable (proceed, conviction, not-fundable, not-reviewed)
    #[arg(long = "prelovc")]
    pub(crate) prelovc: Vec<String>,
    /// Accepted investor status, repeatable
    #[arg(long = "investor")]
    pub(crate) investor: Vec<String>,
    /// Only show favorites
    #[arg(long)]
    pub(crate) favorites: bool,
    /// Case-insensitive search over company, industry and founders
    #[arg(short, long, default_value = "")]
    pub(crate) search: String,
    /// Sort field (matchScore, market, team, product, traction, vcMatch, uploadedAt, company, ...)
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// Sort direction (asc or desc)
    #[arg(long)]
    pub(crate) direction: Option<String>,
    /// Toggle a deal's favorite flag before listing, repeatable
    #[arg(long = "toggle-favorite", value_name = "ID")]
    pub(crate) toggle_favorite: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct UploadArgs {
    /// Pitch deck to process (PDF only)
    pub(crate) file: PathBuf,
    /// Skip the per-step progress delay
    #[arg(long)]
    pub(crate) no_delay: bool,
    /// List the deal book, new deal included, once scoring completes
    #[arg(long)]
    pub(crate) then_list: bool,
    /// Filters and sort for --then-list
    #[command(flatten)]
    pub(crate) list: ListArgs,
}

impl ListArgs {
    fn filters(&self) -> Result<FilterConfig, AppError> {
        let range = if self.high_match {
            HIGH_MATCH_PRESET.range
        } else {
            MatchRange::new(self.min, self.max)
        };

        let filters = FilterConfig::default()
            .with_match_range(range)
            .with_stages(self.stages.iter().map(|s| Stage::from(s.clone())))
            .with_prelovc_status(self.prelovc.iter().map(|s| ReviewStatus::from(s.clone())))
            .with_investor_status(self.investor.iter().map(|s| ReviewStatus::from(s.clone())))
            .with_only_favorites(self.favorites)
            .with_search_query(self.search.clone());

        Ok(filters.validated()?)
    }

    fn sort(&self, default: SortConfig) -> Result<SortConfig, AppError> {
        let field = match &self.sort {
            Some(raw) => raw.parse::<SortField>()?,
            None => default.field,
        };
        let direction = match &self.direction {
            Some(raw) => raw.parse::<SortDirection>()?,
            None if self.sort.is_some() => SortDirection::Desc,
            None => default.direction,
        };
        Ok(SortConfig::new(field, direction))
    }

    fn apply_toggles(&self, book: &mut DealBook) -> Result<(), AppError> {
        for id in &self.toggle_favorite {
            let favorite = book.toggle_favorite(id)?;
            info!("Deal {} favorite set to {}", id, favorite);
        }
        Ok(())
    }

    fn query(&self, book: &DealBook, default_sort: SortConfig) -> Result<DealListResponse, AppError> {
        let filters = self.filters()?;
        let sort = self.sort(default_sort)?;
        let result = DealFilterSort::new(sort).apply(book.deals(), &filters);

        info!(
            "Showing {} of {} deals",
            result.matched(),
            result.total_candidates
        );

        Ok(DealListResponse {
            matched: result.matched(),
            total_candidates: result.total_candidates,
            match_range_label: match_range_label(&filters.match_range).to_string(),
            deals: result.deals,
            filters,
            sort,
        })
    }
}

fn print_listing(listing: &DealListResponse, ctx: &RenderContext) {
    println!("{}", render_deal_table(&listing.deals, ctx));
    println!(
        "{} of {} deals | {} | sorted by {} {}",
        listing.matched,
        listing.total_candidates,
        listing.match_range_label,
        listing.sort.field,
        listing.sort.direction
    );
}

/// Run a deck through the upload steps and add the scored deal to `book`
async fn upload_into(
    book: &mut DealBook,
    args: &UploadArgs,
    settings: &Settings,
    echo_steps: bool,
) -> Result<UploadResponse, AppError> {
    let delay = if args.no_delay {
        std::time::Duration::ZERO
    } else {
        settings.upload.step_delay()
    };

    info!("Processing pitch deck {}", args.file.display());
    let mut steps = Vec::new();
    let deal = run_upload(&args.file, delay, |stage| {
        let line = render_upload_step(stage);
        if echo_steps {
            println!("{}", line);
        }
        steps.push(line);
    })
    .await?;

    let summary = UploadSummary::of(&deal);
    let analysis = DealAnalysis::of(&deal);
    book.insert(deal)?;

    let listing = if args.then_list {
        args.list.apply_toggles(book)?;
        Some(args.list.query(book, settings.query.default_sort())?)
    } else {
        None
    };

    Ok(UploadResponse {
        file_name: args.file.display().to_string(),
        steps,
        summary,
        analysis,
        listing,
    })
}

pub(crate) fn load_settings(cli: &Cli) -> Result<Settings, AppError> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    Ok(settings)
}

fn load_book(cli: &Cli, settings: &Settings) -> Result<DealBook, AppError> {
    let path = cli.data.as_ref().or(settings.data.deals_path.as_ref());
    let book = match path {
        Some(path) => DealBook::from_json_file(path)?,
        None => DealBook::sample(),
    };
    info!("Loaded {} deals", book.len());
    Ok(book)
}

pub(crate) async fn run(cli: Cli, settings: Settings) -> Result<(), AppError> {
    let ctx = RenderContext::new(cli.theme.map(Theme::from).unwrap_or(settings.display.theme));
    let json = cli.format == OutputFormat::Json;

    match &cli.command {
        Command::List(args) => {
            let mut book = load_book(&cli, &settings)?;
            args.apply_toggles(&mut book)?;
            let listing = args.query(&book, settings.query.default_sort())?;

            if json {
                println!("{}", render_json(&listing)?);
            } else {
                print_listing(&listing, &ctx);
            }
        }
        Command::Analyze { id } => {
            let book = load_book(&cli, &settings)?;
            let analysis = DealAnalysis::of(book.get(id)?);
            if json {
                println!("{}", render_json(&analysis)?);
            } else {
                println!("{}", render_analysis(&analysis, &ctx));
            }
        }
        Command::Favorite { id } => {
            let mut book = load_book(&cli, &settings)?;
            let favorite = book.toggle_favorite(id)?;
            let response = FavoriteResponse {
                deal_id: id.clone(),
                favorite,
                favorites: book.favorites().map(|deal| deal.id.clone()).collect(),
            };
            if json {
                println!("{}", render_json(&response)?);
            } else {
                let state = if favorite { "added to" } else { "removed from" };
                println!("Deal {} {} favorites", id, state);
                println!("Favorites: {}", response.favorites.join(", "));
            }
        }
        Command::Upload(args) => {
            let mut book = load_book(&cli, &settings)?;
            let response = upload_into(&mut book, args, &settings, !json).await?;

            if json {
                println!("{}", render_json(&response)?);
            } else {
                println!("{}", render_upload_summary(&response.summary));
                println!("{}", render_analysis(&response.analysis, &ctx));
                if let Some(listing) = &response.listing {
                    print_listing(listing, &ctx);
                }
            }
        }
        Command::Presets => {
            println!("{}", render_presets(&ctx));
        }
        Command::Config => {
            println!("{}", settings.to_toml()?);
        }
    }

    Ok(())
}

use chrono::Local;
use moltbook_client::MoltbookApiClient;
use moltdigest_core::{AppConfig, CoreError, Credentials, ErrorExt};
use relevance_engine::{select_top, Lexicon, SelectionPolicy};
use report_writer::{render_entry, DigestWriter, HeuristicAnnotator};
use state_store::StateStore;

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt()
        .with_env_filter("moltdigest=info,moltbook_client=info,report_writer=info,state_store=info")
        .init();

    tracing::info!("Starting Moltbook digest run");

    if let Err(e) = run().await {
        e.log_error();
        return Err(e);
    }
    Ok(())
}

async fn run() -> Result<(), CoreError> {
    let config = AppConfig::load()?;
    let credentials = Credentials::load(&config.credentials_path)?;

    let client = MoltbookApiClient::new(&config.api_base, credentials.api_key);
    let posts = client
        .fetch_candidates(config.hot_want, config.new_want)
        .await?;
    tracing::info!("Fetched {} candidate posts", posts.len());

    let store = StateStore::new(&config.state_path);
    let mut state = store.load();

    let lexicon = if config.keywords.is_empty() {
        Lexicon::default_interests()
    } else {
        Lexicon::from_map(&config.keywords)
    };
    let policy = SelectionPolicy {
        filter_seen: config.filter_seen,
        ..SelectionPolicy::default()
    };

    let seen = state.id_snapshot();
    let selected = select_top(&posts, &lexicon, &policy, &seen);
    tracing::info!("Selected {} posts for the digest", selected.len());

    let annotator = HeuristicAnnotator;
    let entries: Vec<String> = selected
        .iter()
        .map(|scored| render_entry(scored, &annotator))
        .collect();

    let now = Local::now();
    let intro = format!(
        "本輪精選（來源：熱門前{} + 最新{}；已篩選/摘要/給可落地點子）：",
        config.hot_want, config.new_want
    );
    let writer = DigestWriter::new(&config.reports_dir);
    let out_path = writer.append_section(&now, &intro, &entries)?;

    state.record_all(posts.iter().map(|p| p.id.clone()));
    state.set_last_run(now.to_rfc3339());
    store.save(&state)?;

    println!("{}", out_path.display());
    Ok(())
}

use clap::Parser;
use incident_notifier::{EscalationPolicy, OpenIncident};

#[derive(Parser)]
struct Opts {
    /// title of the incident to open
    title: String,

    #[arg(long, default_value = "")]
    message: String,

    #[arg(long)]
    dedup_key: Option<String>,

    /// route to person A instead of everyone
    #[arg(long)]
    person_a: bool,

    /// resolve the incident right after opening it
    #[arg(long)]
    resolve: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();

    let Some(notifier) = incident_notifier::bootstrap::from_env() else {
        println!("PAGERDUTY_API_KEY/PAGERDUTY_SERVICE_ID not set, nothing to do");
        return;
    };

    let mut request = OpenIncident::builder()
        .title(opts.title)
        .message(opts.message)
        .build();
    if let Some(dedup_key) = opts.dedup_key {
        request = request.with_dedup_key(dedup_key);
    }
    if opts.person_a {
        request = request.with_policy(EscalationPolicy::JustPersonA);
    }

    let Some(handle) = notifier.open(request).await.confirmed() else {
        println!("* incident not confirmed");
        return;
    };
    println!("* opened {} (dedup key {})", handle.id, handle.key);

    if opts.resolve {
        let resolved = notifier.resolve(&handle.id).await;
        println!("* resolved: {}", resolved.is_confirmed());
    }
}

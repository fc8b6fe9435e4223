//! Collection counts from the configured store

use serde_json::json;

use crate::config::Config;
use crate::models::feedback::average_rating;
use crate::storage::open_store;

pub async fn cmd_stats(config: &Config, as_json: bool) -> anyhow::Result<()> {
    let store = open_store(&config.storage).await?;
    let stats = store.stats().await;
    let feedback = store.list_feedback().await?;
    let average = average_rating(&feedback);

    if as_json {
        let report = json!({
            "backend": store.backend(),
            "stats": stats,
            "averageRating": average,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("BounceBack content ({} storage)", store.backend());
    println!("{:-<40}", "");
    println!("{:<22}{:>10}", "Question papers", stats.total_papers);
    println!("{:<22}{:>10}", "Videos", stats.total_videos);
    println!("{:<22}{:>10}", "Notes", stats.total_notes);
    println!("{:<22}{:>10}", "Users", stats.total_users);
    println!("{:<22}{:>10}", "Feedback", stats.total_feedback);
    println!("{:<22}{:>10}", "Enrollments", stats.total_enrollments);

    match average {
        Some(avg) => println!("{:<22}{:>10.1}", "Average rating", avg),
        None => println!("{:<22}{:>10}", "Average rating", "-"),
    }

    Ok(())
}

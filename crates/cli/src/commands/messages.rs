//! `pincer messages` — Show the full message list for one turn.

use pincer_agent::ContextBuilder;
use pincer_config::AppConfig;

pub fn run(
    config: &AppConfig,
    message: &str,
    summary: &str,
    channel: &str,
    chat_id: &str,
) -> pincer_core::Result<()> {
    let builder = ContextBuilder::from_config(config);
    let messages = builder.build_messages(Vec::new(), summary, message, channel, chat_id);
    println!("{}", serde_json::to_string_pretty(&messages)?);
    Ok(())
}

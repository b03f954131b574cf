//! `pincer prompt` — Print the static system prompt.

use pincer_agent::ContextBuilder;
use pincer_config::AppConfig;

pub fn run(config: &AppConfig) -> pincer_core::Result<()> {
    let builder = ContextBuilder::from_config(config);
    println!("{}", builder.get_prompt());

    let info = builder.skills_info();
    eprintln!(
        "\n🦀 workspace: {} | skills: {}/{}",
        builder.layout().root().display(),
        info.available,
        info.total
    );
    Ok(())
}

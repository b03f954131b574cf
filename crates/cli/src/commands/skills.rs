//! `pincer skills` — Skill listing and inspection.

use pincer_config::AppConfig;
use pincer_skills::SkillsLoader;

fn loader(config: &AppConfig) -> SkillsLoader {
    SkillsLoader::new(
        config.layout().skills_dir(),
        Some(config.global_skills_dir()),
        Some(config.builtin_skills_dir()),
    )
}

pub fn list(config: &AppConfig) -> pincer_core::Result<()> {
    let skills = loader(config).list_skills();

    println!("🧩 Skills");
    println!("=========");
    if skills.is_empty() {
        println!("  No skills installed.");
        return Ok(());
    }
    for skill in &skills {
        println!("  {:<24} [{}] {}", skill.name, skill.source, skill.description);
        println!("  {:<24} {}", "", skill.path.display());
    }
    Ok(())
}

pub fn show(config: &AppConfig, name: &str) -> pincer_core::Result<()> {
    let body = loader(config).require_skill(name)?;
    println!("{body}");
    Ok(())
}

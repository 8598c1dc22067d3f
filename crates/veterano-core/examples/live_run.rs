use veterano_core::VeteranoScraper;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let scraper = VeteranoScraper::new();

    println!("🏀 Scrapeando NBA Mínimo de Veterano...\n");

    let result = scraper.run().await?;

    println!("Episodios únicos: {}", result.stats.total_episodes);
    println!("Páginas scrapeadas: {}", result.stats.pages_scraped);
    println!("Duplicados eliminados: {}", result.stats.duplicates_removed);

    if !result.episodes.is_empty() {
        println!("\nPrimeros episodios:");
        for (i, episode) in result.episodes.iter().take(3).enumerate() {
            println!("  {}. {} ({})", i + 1, episode.title, episode.date);
            println!("     🎵 {}", episode.audio_url);
        }
    }

    Ok(())
}

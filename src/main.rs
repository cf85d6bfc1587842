use anyhow::Context;
use property_desk::admin::{condition_badge, dashboard_stats, purpose_badge, whatsapp_link};
use property_desk::api::{ListingBackend, PropertyQuery, RestClient};
use property_desk::config::DeskConfig;
use property_desk::models::Property;
use property_desk::search::{
    featured_showcase, filter_by_category, filter_properties, format_price_display, unique_cities,
    unique_neighborhoods, Category, FilterState, SHOWCASE_LIMIT,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DeskConfig::from_env().context("Failed to load configuration")?;
    info!("🏠 Property desk - {}", config.backend_url);

    let client = RestClient::new(config).context("Failed to build HTTP client")?;

    // Optional argument: a search query string, e.g. "purpose=comprar&city=Brasilia&rooms=3"
    let filters = std::env::args()
        .nth(1)
        .map(|raw| FilterState::from_query(url::form_urlencoded::parse(raw.trim_start_matches('?').as_bytes())))
        .unwrap_or_default();

    let query = PropertyQuery::from_filters(&filters);
    let properties = client
        .list_properties(&query)
        .await
        .context("Failed to fetch listings")?;
    info!("Fetched {} published listings", properties.len());

    if filters.is_empty() {
        print_homepage(&properties);
    } else {
        let results = filter_properties(&properties, &filters);
        println!("{} imóveis encontrados", results.len());
        for chip in filters.active_chips() {
            println!("  filtro: {}", chip.label);
        }
        println!();
        print_listings(&results);
    }

    if client.is_authenticated() {
        let all = client
            .list_properties(&PropertyQuery::admin())
            .await
            .context("Failed to fetch admin listings")?;
        let stats = dashboard_stats(&all);
        println!("Painel: {} imóveis, {} ativos", stats.total, stats.active);
    }

    Ok(())
}

fn print_homepage(properties: &[Property]) {
    println!("Destaques");
    print_listings(&featured_showcase(properties, SHOWCASE_LIMIT));

    for category in [Category::Buy, Category::Rent, Category::Launches] {
        let tab = filter_by_category(properties, category);
        println!("{} ({})", category.label(), tab.len());
        print_listings(&tab.into_iter().take(SHOWCASE_LIMIT).collect::<Vec<_>>());
    }

    println!("Cidades: {}", unique_cities(properties).join(", "));
    println!("Bairros: {}", unique_neighborhoods(properties).join(", "));
    println!("Contato: {}", whatsapp_link(None));
}

fn print_listings(properties: &[Property]) {
    for (i, property) in properties.iter().enumerate() {
        let badges: Vec<&str> = property
            .purpose
            .map(purpose_badge)
            .into_iter()
            .chain(property.condition.and_then(condition_badge))
            .collect();

        println!("{}. {} [{}]", i + 1, property.title, badges.join(" · "));
        println!(
            "   {}",
            format_price_display(property.price, property.price_on_request)
        );
        println!(
            "   {} quartos, {} banheiros, {} vagas, {} m²",
            property.bedrooms, property.bathrooms, property.garages, property.area
        );
        println!("   {} - {}", property.neighborhood, property.city);
        println!();
    }
}

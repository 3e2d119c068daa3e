use clap::Parser;
use renovivo_quote::core::offer::OFFER_FILENAME;
use renovivo_quote::core::pricing::discount_percent_label;
use renovivo_quote::utils::error::{ErrorSeverity, QuoteError};
use renovivo_quote::utils::format::{format_area, format_money};
use renovivo_quote::utils::{logger, validation::Validate};
use renovivo_quote::{
    save_offer, submit_contact, CliConfig, LocalDownloads, OfferDocumentFormatter, QuoteSession,
    SelectionEvent, SimulatedContactGateway, TomlConfig,
};
use std::collections::BTreeSet;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting renovivo-quote");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let settings = match load_settings(&config) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = run(&config, &settings).await {
        exit_with(&e);
    }

    Ok(())
}

fn load_settings(config: &CliConfig) -> Result<TomlConfig, QuoteError> {
    let mut settings = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading catalog configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };

    // 命令列覆蓋設定
    if let Some(variant) = config.variant {
        settings.catalog.variant = Some(variant.to_string());
        tracing::info!("🔧 Tier catalog variant overridden to: {}", variant);
    }

    settings.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");
    Ok(settings)
}

async fn run(config: &CliConfig, settings: &TomlConfig) -> Result<(), QuoteError> {
    let branding = settings.branding();
    let mut session = QuoteSession::with_state(settings.catalog()?, settings.initial_state())?;

    let mut events = Vec::new();
    if let Some(area) = config.area {
        events.push(SelectionEvent::AreaChanged(area));
    }
    if let Some(room) = &config.room {
        events.push(SelectionEvent::RoomTypeSelected(room.clone()));
    }
    if let Some(tier) = &config.tier {
        events.push(SelectionEvent::TierSelected(tier.clone()));
    }
    // 重複的服務只切換一次
    let services: BTreeSet<&String> = config.services.iter().collect();
    events.extend(
        services
            .into_iter()
            .map(|id| SelectionEvent::ServiceToggled(id.clone())),
    );
    events.push(SelectionEvent::ContactChanged(config.contact_info()));

    session.apply_all(events)?;

    if let Some(requested) = config.area {
        if requested != session.state().area {
            tracing::warn!(
                "Area {} is outside the slider range, using {}",
                requested,
                session.state().area
            );
        }
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(session.breakdown())?);
    } else {
        display_quote_summary(&session, &branding.currency_suffix, &branding.area_unit)?;
    }

    if config.offer {
        let formatter = OfferDocumentFormatter::new(branding);
        let document = formatter.render(
            session.state(),
            session.breakdown(),
            session.catalog(),
            None,
        )?;
        let downloads = LocalDownloads::new(config.output_dir.clone());
        let location = save_offer(&downloads, &document).await?;
        println!("📄 {} saved to: {}", OFFER_FILENAME, location);
    }

    if config.submit {
        let gateway = SimulatedContactGateway::new(settings.simulated_delay());
        submit_contact(&gateway, &session.state().contact_info).await?;
        println!("✅ {}", renovivo_quote::core::contact::SUBMITTED_MESSAGE);
    }

    Ok(())
}

fn display_quote_summary(
    session: &QuoteSession,
    currency: &str,
    area_unit: &str,
) -> Result<(), QuoteError> {
    let state = session.state();
    let catalog = session.catalog();
    let breakdown = session.breakdown();
    let room = catalog.room(&state.room_type)?;
    let tier = catalog.tier(&state.renovation_tier)?;

    println!("📋 Quote Summary:");
    println!("  Room: {} ({})", room.name, room.id);
    println!("  Area: {}", format_area(state.area, area_unit));
    println!("  Tier: {} ({})", tier.name, tier.id);
    if let Some(duration) = &tier.duration {
        println!("  Duration: {}", duration);
    }
    for id in &state.selected_service_ids {
        match catalog.service(id) {
            Some(service) => println!("  + {}", service.name),
            None => println!("  + {} (unknown, ignored)", id),
        }
    }
    println!();
    println!("  Base price:    {}", format_money(breakdown.base_price, currency));
    if breakdown.add_on_price > 0 {
        println!("  Add-ons:       {}", format_money(breakdown.add_on_price, currency));
    }
    if breakdown.discount > 0 {
        println!(
            "  Discount ({}): {}",
            discount_percent_label(),
            format_money(-breakdown.discount, currency)
        );
    }
    println!("  TOTAL:         {}", format_money(breakdown.total, currency));
    println!();

    Ok(())
}

fn exit_with(e: &QuoteError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,      // 使用者輸入需修正
        ErrorSeverity::Medium => 2,   // 可重試
        ErrorSeverity::High => 1,     // 設定或檔案錯誤
        ErrorSeverity::Critical => 3, // 目錄資料錯誤
    };
    std::process::exit(exit_code);
}

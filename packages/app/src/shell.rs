//! Interactive terminal shell.
//!
//! Pure presentation: renders the current state and dispatches menu
//! selections into the controller's command handlers. No business logic
//! lives here.

use anyhow::Result;
use colored::Colorize;
use console::{truncate_str, Term};
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use gateway::{Job, MarketItem, Place};

use crate::controller::{AppController, PublishOutcome};
use crate::state::{Tab, View};

/// Run the shell until the user quits.
pub async fn run(mut controller: AppController) -> Result<()> {
    let term = Term::stdout();
    print_banner(&term)?;

    loop {
        match controller.state.view {
            View::Login => login_screen(&mut controller).await?,
            View::Admin => admin_screen(&mut controller).await?,
            View::Client => {
                if !client_screen(&mut controller).await? {
                    break;
                }
            }
        }
    }

    println!("{}", "Até logo! 👋".bright_blue());
    Ok(())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!("{}", "╔══════════════════════════════════╗".bright_green());
    println!("{}", "║        PARIS CONNECTION          ║".bright_green());
    println!("{}", "║   Brasil em Paris — comunidade   ║".bright_green());
    println!("{}", "╚══════════════════════════════════╝".bright_green());
    println!();
    Ok(())
}

async fn client_screen(controller: &mut AppController) -> Result<bool> {
    render_tab(controller);

    let mut options: Vec<String> = Tab::variants()
        .iter()
        .map(|tab| format!("{} {}", tab.icon(), tab.label()))
        .collect();
    options.push(if controller.state.is_authenticated() {
        "🔐 Painel Admin".to_string()
    } else {
        "👤 Entrar".to_string()
    });
    options.push("🚪 Sair do aplicativo".to_string());

    let current = Tab::variants()
        .iter()
        .position(|t| *t == controller.state.tab)
        .unwrap_or(0);
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Navegação")
        .items(&options)
        .default(current)
        .interact()?;

    match selection {
        i if i < Tab::variants().len() => {
            controller.state.select_tab(Tab::variants()[i]);
            match controller.state.tab {
                Tab::Market => market_screen(controller)?,
                Tab::Favorites => favorites_screen(controller)?,
                _ => {}
            }
        }
        i if i == Tab::variants().len() => controller.state.open_dashboard(),
        _ => return Ok(false),
    }
    Ok(true)
}

fn render_tab(controller: &AppController) {
    let state = &controller.state;
    println!();
    match state.tab {
        Tab::Home => {
            println!("{}", "Sua nova vida na França começa aqui.".bold());
            println!(
                "  {}  {} ativos",
                "🛍 Serviços".bright_magenta(),
                state.market.len()
            );
            println!(
                "  {}  {} ativas",
                "💼 Vagas".bright_yellow(),
                state.jobs.len()
            );
            println!(
                "  {}  {} lugares",
                "🗺 Guia".bright_cyan(),
                state.places.len()
            );
        }
        Tab::Market => {
            println!("{}", "Classificados".bold());
            for item in state.filtered_market() {
                print_market_card(item, state.is_favorite(&item.id));
            }
        }
        Tab::Jobs => {
            println!("{}", "Vagas de Emprego".bold());
            for job in &state.jobs {
                print_job_card(job);
            }
        }
        Tab::Places => {
            println!("{}", "Guia de Lugares".bold());
            for place in &state.places {
                print_place_card(place);
            }
        }
        Tab::Favorites => {
            println!("{}", "Favoritos".bold());
            let items = state.favorite_items();
            if items.is_empty() {
                println!("  {}", "Nenhum item salvo".dimmed());
            }
            for item in items {
                print_market_card(item, true);
            }
        }
    }
    println!();
}

fn print_market_card(item: &MarketItem, favorited: bool) {
    let heart = if favorited { "♥".red() } else { "♡".dimmed() };
    let premium = if item.is_premium { " ★".yellow() } else { "".normal() };
    println!(
        "  {heart} {}{premium}  [{}]",
        item.title.bold(),
        item.category.green()
    );
    if !item.description.is_empty() {
        println!("     {}", truncate_str(&item.description, 60, "…").to_string().dimmed());
    }
    println!(
        "     {}  {}",
        item.price.as_deref().unwrap_or("Consultar").bold(),
        format!("wa.me/{}", item.whatsapp).bright_green()
    );
}

fn print_job_card(job: &Job) {
    let premium = if job.is_premium { " ★".yellow() } else { "".normal() };
    println!("  {}{premium}", job.title.bold());
    println!(
        "     {} · {} · {}",
        job.company.dimmed(),
        job.location.dimmed(),
        job.employment_type.dimmed()
    );
    println!(
        "     Salário: {}",
        job.salary.as_deref().unwrap_or("A combinar").bright_magenta()
    );
}

fn print_place_card(place: &Place) {
    let premium = if place.is_premium { " ★".yellow() } else { "".normal() };
    println!(
        "  {} {}{premium}  [{}]",
        format!("★ {:.1}", place.rating).yellow(),
        place.name.bold(),
        place.category.cyan()
    );
    println!("     {}", place.address.dimmed());
    if !place.maps_url.is_empty() {
        println!("     {}", place.maps_url.bright_blue());
    }
}

/// Market tab actions: search and favorite toggling.
fn market_screen(controller: &mut AppController) -> Result<()> {
    loop {
        let items: Vec<MarketItem> = controller
            .state
            .filtered_market()
            .into_iter()
            .cloned()
            .collect();

        let mut options: Vec<String> = items
            .iter()
            .map(|item| {
                let heart = if controller.state.is_favorite(&item.id) { "♥" } else { "♡" };
                format!("{heart} {}", item.title)
            })
            .collect();
        options.push("🔍 Buscar".to_string());
        options.push("⬅ Voltar".to_string());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("O que você precisa?")
            .items(&options)
            .default(options.len() - 1)
            .interact()?;

        if selection < items.len() {
            controller.state.toggle_favorite(&items[selection].id);
        } else if selection == items.len() {
            let term: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Buscar serviços")
                .allow_empty(true)
                .interact_text()?;
            controller.state.set_search(term);
            render_tab(controller);
        } else {
            return Ok(());
        }
    }
}

/// Favorites tab: remove items from the set.
fn favorites_screen(controller: &mut AppController) -> Result<()> {
    loop {
        let items: Vec<MarketItem> = controller
            .state
            .favorite_items()
            .into_iter()
            .cloned()
            .collect();
        if items.is_empty() {
            return Ok(());
        }

        let mut options: Vec<String> = items
            .iter()
            .map(|item| format!("🗑 {}", item.title))
            .collect();
        options.push("⬅ Voltar".to_string());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Remover dos salvos")
            .items(&options)
            .default(options.len() - 1)
            .interact()?;

        if selection < items.len() {
            controller.state.toggle_favorite(&items[selection].id);
        } else {
            return Ok(());
        }
    }
}

async fn login_screen(controller: &mut AppController) -> Result<()> {
    println!();
    println!("{}", "Painel Admin".bold());

    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("E-mail (vazio para voltar)")
        .allow_empty(true)
        .interact_text()?;
    if email.is_empty() {
        controller.state.cancel_login();
        return Ok(());
    }
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Senha")
        .interact()?;

    // Single attempt, no retry; a generic notice covers every failure.
    match controller.sign_in(&email, &password).await {
        Ok(_) => println!("{}", "Bem-vindo! ✓".bright_green()),
        Err(_) => println!("{}", "Erro ao entrar".bright_red()),
    }
    Ok(())
}

async fn admin_screen(controller: &mut AppController) -> Result<()> {
    println!();
    println!("{}", "Gestão de Conteúdo".bold());
    if !controller.extraction_enabled() {
        println!(
            "{}",
            "Publicação com IA indisponível (credencial ausente)".yellow()
        );
    }

    let options = vec![
        "✨ Publicar com IA",
        "🗑 Remover conteúdo recente",
        "⬅ Voltar ao app",
        "🚪 Sair da conta",
    ];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Administração")
        .items(&options)
        .default(0)
        .interact()?;

    match selection {
        0 => publish_screen(controller).await?,
        1 => delete_screen(controller).await?,
        2 => controller.state.go_home(),
        _ => {
            controller.sign_out().await;
            println!("{}", "Sessão encerrada".dimmed());
        }
    }
    Ok(())
}

async fn publish_screen(controller: &mut AppController) -> Result<()> {
    let raw_text: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Cole o texto bruto do anúncio (vazio para cancelar)")
        .allow_empty(true)
        .interact_text()?;
    if raw_text.is_empty() {
        return Ok(());
    }

    println!("{}", "Processando…".dimmed());
    match controller.publish(&raw_text).await {
        PublishOutcome::Published(record) => println!(
            "{} {}",
            "Publicado com sucesso!".bright_green(),
            record.display_title()
        ),
        PublishOutcome::ExtractionFailed => {
            println!("{}", "Não foi possível interpretar o texto".bright_red())
        }
        PublishOutcome::StorageFailed(message) => {
            println!("{} {}", "Falha ao salvar:".bright_red(), message)
        }
    }
    Ok(())
}

async fn delete_screen(controller: &mut AppController) -> Result<()> {
    let recents = controller.recent_records();
    if recents.is_empty() {
        println!("{}", "Nada para remover".dimmed());
        return Ok(());
    }

    let mut options: Vec<String> = recents
        .iter()
        .map(|r| format!("{} ({})", r.display_title(), r.collection()))
        .collect();
    options.push("⬅ Voltar".to_string());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Recém adicionados")
        .items(&options)
        .default(options.len() - 1)
        .interact()?;

    if selection < recents.len() {
        match controller.delete_record(&recents[selection]).await {
            Ok(()) => println!("{}", "Removido".bright_green()),
            Err(e) => println!("{} {}", "Falha ao remover:".bright_red(), e),
        }
    }
    Ok(())
}

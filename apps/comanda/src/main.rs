use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{AuthClient, FileTokenStore, Landing};
use screens::{
    chat::ChatScreen,
    login::LoginScreen,
    menu::{format_currency, MenuScreen},
    orders::{OrdersScreen, StatusFilter, EMPTY_STATE_TITLE},
    registration::{Field, RegistrationError, SignupForm},
    schedule::{ScheduleEditor, ScheduleError},
};
use shared::{domain::MenuItemId, protocol::SignupImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "comanda", about = "Restaurant ordering client")]
struct Args {
    /// Overrides the API base url from settings.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a customer or restaurant account.
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: Option<String>,
        #[arg(long)]
        restaurant: bool,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// List sample orders, optionally by status ("all", "Entregue", ...).
    Orders {
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Show the operating hours, toggling or editing days first.
    Hours {
        #[arg(long)]
        toggle: Vec<usize>,
        #[arg(long, requires = "open", requires = "close")]
        day: Option<usize>,
        #[arg(long, allow_hyphen_values = true)]
        open: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        close: Option<String>,
    },
    /// Show the menu after optional additions and removals.
    Menu {
        #[arg(long, requires = "price")]
        add: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        remove: Vec<String>,
    },
    /// Talk to the assistant; each message gets the scripted reply.
    Chat { messages: Vec<String> },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut settings = load_settings()?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    info!(api_url = %settings.api_url, "settings loaded");

    match args.command {
        Command::Login { email, password } => login(&settings, email, password).await,
        Command::Signup {
            first_name,
            last_name,
            email,
            phone,
            password,
            confirm_password,
            restaurant,
            image,
        } => {
            let mut form = SignupForm::new();
            form.handle_change(Field::FirstName, first_name);
            form.handle_change(Field::LastName, last_name);
            form.handle_change(Field::Email, email);
            form.handle_change(Field::Phone, phone);
            form.handle_change(
                Field::ConfirmPassword,
                confirm_password.unwrap_or_else(|| password.clone()),
            );
            form.handle_change(Field::Password, password);
            signup(&settings, form, restaurant, image).await
        }
        Command::Orders { status } => {
            orders(status);
            Ok(ExitCode::SUCCESS)
        }
        Command::Hours {
            toggle,
            day,
            open,
            close,
        } => Ok(hours(&toggle, day, open.as_deref(), close.as_deref())),
        Command::Menu {
            add,
            price,
            description,
            remove,
        } => Ok(menu(add, price, description, &remove)),
        Command::Chat { messages } => chat(&settings, messages).await,
    }
}

async fn login(settings: &Settings, email: String, password: String) -> Result<ExitCode> {
    let client = AuthClient::with_timeout(&settings.api_url, settings.api_timeout)?;
    let mut screen = LoginScreen::new(client, FileTokenStore::new(&settings.token_path));
    screen.set_email(email);
    screen.set_password(password);

    let outcome = screen.submit().await;
    println!("{}", outcome.alert);
    match outcome.landing {
        Some(Landing::RestaurantHome) => println!("-> restaurant home"),
        Some(Landing::UserMenu) => println!("-> user menu"),
        None => return Ok(ExitCode::FAILURE),
    }
    Ok(ExitCode::SUCCESS)
}

async fn signup(
    settings: &Settings,
    mut form: SignupForm,
    restaurant: bool,
    image: Option<PathBuf>,
) -> Result<ExitCode> {
    let image = match image {
        Some(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read image '{}'", path.display()))?;
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("image.bin")
                .to_string();
            let mime_type = mime_guess::from_path(&path).first_raw().map(str::to_string);
            Some(SignupImage {
                filename,
                mime_type,
                bytes,
            })
        }
        None => None,
    };

    let client = AuthClient::with_timeout(&settings.api_url, settings.api_timeout)?;
    match form.submit(&client, restaurant, image).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(RegistrationError::Invalid(errors)) => {
            for (field, message) in errors {
                eprintln!("{field}: {message}");
            }
            Ok(ExitCode::FAILURE)
        }
        Err(RegistrationError::Api(err)) => Err(err).context("signup request failed"),
    }
}

fn orders(status: StatusFilter) {
    let mut screen = OrdersScreen::default();
    screen.select_filter(status);

    if let Some(message) = screen.empty_state() {
        println!("{EMPTY_STATE_TITLE}\n{message}");
        return;
    }
    for order in screen.visible_orders() {
        println!("Pedido #{} - {} [{}]", order.id, order.date, order.status);
        for item in &order.items {
            println!(
                "  {}x {} {}",
                item.quantity,
                item.name,
                format_currency(item.price)
            );
        }
        if let Some(total) = order.total {
            println!("  Total: {}", format_currency(total));
        }
    }
}

fn hours(
    toggle: &[usize],
    day: Option<usize>,
    open: Option<&str>,
    close: Option<&str>,
) -> ExitCode {
    let mut editor = ScheduleEditor::new();
    let mut code = ExitCode::SUCCESS;

    for &index in toggle {
        if let Err(err) = editor.toggle_day_status(index) {
            eprintln!("{}", err.to_alert());
            code = ExitCode::FAILURE;
        }
    }

    if let Some(index) = day {
        let edited = edit_day(
            &mut editor,
            index,
            open.unwrap_or_default(),
            close.unwrap_or_default(),
        );
        if let Err(err) = edited {
            editor.cancel_edit();
            eprintln!("{}", err.to_alert());
            code = ExitCode::FAILURE;
        }
    }

    for (index, schedule) in editor.schedules().iter().enumerate() {
        let label = editor.hours_label(index).unwrap_or_default();
        println!("{:<14} {label}", schedule.day);
    }
    code
}

fn edit_day(
    editor: &mut ScheduleEditor,
    index: usize,
    open: &str,
    close: &str,
) -> Result<(), ScheduleError> {
    editor.open_edit_modal(index)?;
    editor.handle_open_time_change(open)?;
    editor.handle_close_time_change(close)?;
    editor.save_time_changes()?;
    Ok(())
}

fn menu(
    add: Option<String>,
    price: Option<String>,
    description: String,
    remove: &[String],
) -> ExitCode {
    let mut screen = MenuScreen::default();
    let mut code = ExitCode::SUCCESS;

    for id in remove {
        if screen.remove_menu_item(&MenuItemId::new(id.as_str())).is_none() {
            eprintln!("no menu item with id {id}");
        }
    }

    if let Some(name) = add {
        screen.open_add_modal();
        let draft = screen.draft_mut();
        draft.name = name;
        draft.set_price_text(price.as_deref().unwrap_or_default());
        draft.description = description;
        if let Err(err) = screen.add_menu_item() {
            eprintln!("{err}");
            code = ExitCode::FAILURE;
        }
    }

    for item in screen.items() {
        println!("[{}] {} {}", item.id, item.name, format_currency(item.price));
        if !item.description.is_empty() {
            println!("    {}", item.description);
        }
    }
    code
}

async fn chat(settings: &Settings, messages: Vec<String>) -> Result<ExitCode> {
    let mut screen = ChatScreen::with_reply_delay(settings.chat_reply_delay);
    for message in messages {
        screen.set_draft(message);
        screen.send_message()?;
    }
    while screen.next_reply().await.is_some() {}

    for message in screen.messages() {
        let who = if message.from_user { "você" } else { "assistente" };
        println!("[{}] {who}: {}", message.time_label(), message.text);
    }
    Ok(ExitCode::SUCCESS)
}

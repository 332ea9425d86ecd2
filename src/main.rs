use clinic_client::{
    models::user::{Credentials, RegisterRequest},
    render,
    router::{Modal, Section},
    storage::FileStorage,
    validation::appointment::BookingForm,
    App, Config,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
Commands:
  login <username> <password>      sign in
  demo                             sign in with the demo account
  register <username> <email> <password> <first> <last> [phone]
  logout
  dashboard | appointments | doctors | patients
  filter <all|scheduled|confirmed|completed|cancelled>
  book [doctor_id]                 open the booking form
  submit <doctor_id> <YYYY-MM-DD> <HH:MM> [reason...]
  cancel <appointment_id>
  details <appointment_id>
  availability <doctor_id>
  dismiss | health | help | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let storage = FileStorage::new(config.storage_path.clone());
    let mut app = App::new(config, Box::new(storage))?;

    app.startup().await;
    paint(&mut app);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };

        match command {
            "quit" | "exit" => break,
            "help" => {
                println!("{}", HELP);
                continue;
            }
            _ => {}
        }

        if let Err(e) = dispatch(&mut app, command, args).await {
            tracing::debug!("Command `{}` failed: {}", command, e);
        }
        paint(&mut app);
    }

    tracing::info!("👋 Bye");
    Ok(())
}

async fn dispatch(app: &mut App, command: &str, args: &[&str]) -> clinic_client::Result<()> {
    match (command, args) {
        ("login", [username, password]) => {
            app.handle_login(Credentials::new(*username, *password)).await
        }
        ("login", _) => {
            app.show_login();
            Ok(())
        }
        ("demo", _) => app.handle_demo_login().await,
        ("register", [username, email, password, first, last, rest @ ..]) => {
            let mut request = RegisterRequest::patient(*username, *email, *password, *first, *last);
            if let Some(phone) = rest.first() {
                request = request.with_phone(*phone);
            }
            app.handle_register(request).await
        }
        ("register", _) => {
            app.show_register();
            Ok(())
        }
        ("logout", _) => app.logout(),
        ("filter", [name]) => app.set_filter(name).map(|_| ()),
        ("book", rest) => {
            let preselect = rest.first().and_then(|id| id.parse().ok());
            app.show_book_appointment(preselect).await;
            Ok(())
        }
        ("submit", [doctor_id, date, time, reason @ ..]) => {
            let form = BookingForm {
                doctor_id: doctor_id.to_string(),
                date: date.to_string(),
                time: time.to_string(),
                reason: reason.join(" "),
            };
            app.handle_book_appointment(&form).await.map(|_| ())
        }
        ("cancel", [id]) => match id.parse() {
            Ok(id) => app.cancel_appointment(id).await,
            Err(_) => {
                println!("usage: cancel <appointment_id>");
                Ok(())
            }
        },
        ("details", [id]) => {
            match id.parse().ok().and_then(|id| app.appointment_details(id)) {
                Some(details) => println!("{}", details),
                None => println!("No such appointment"),
            }
            Ok(())
        }
        ("availability", [id]) => {
            match id.parse() {
                Ok(id) => println!("{}", app.doctor_availability(id)),
                Err(_) => println!("usage: availability <doctor_id>"),
            }
            Ok(())
        }
        ("dismiss", _) => {
            app.notifications_mut().dismiss();
            Ok(())
        }
        ("health", _) => {
            app.test_backend().await;
            Ok(())
        }
        (other, _) => match other.parse::<Section>() {
            Ok(section) => {
                app.navigate(section).await;
                Ok(())
            }
            Err(_) => {
                println!("Unknown command `{}`; try `help`", other);
                Ok(())
            }
        },
    }
}

fn paint(app: &mut App) {
    println!();

    match app.router().modal() {
        Some(Modal::SignIn) => println!("== Login ==  (login <username> <password>, or `demo`)"),
        Some(Modal::Register) => println!("== Register ==  (register <username> <email> <password> <first> <last> [phone])"),
        Some(Modal::BookAppointment) => {
            println!("== Book Appointment ==  (submit <doctor_id> <YYYY-MM-DD> <HH:MM> [reason])");
            println!("{}", render::paint_doctor_options(&app.doctor_options(), app.booking_doctor()));
        }
        None => match app.router().visible() {
            None => println!("== Welcome ==  (login, register or demo)"),
            Some(Section::Dashboard) => {
                println!("== Dashboard ==");
                println!("{}", render::paint_dashboard(&app.dashboard()));
            }
            Some(Section::Appointments) => {
                println!("== My Appointments ==");
                println!("{}", render::paint_filter_tabs(app.projector().filter()));
                print!(
                    "{}",
                    render::paint_appointments(&app.appointment_rows(), &app.projector().empty_message())
                );
            }
            Some(Section::Doctors) => {
                println!("== Our Doctors ==");
                print!("{}", render::paint_doctors(&app.doctor_cards()));
            }
            Some(Section::Patients) => {}
        },
    }

    if let Some(notification) = app.notifications_mut().visible() {
        println!("{}", render::paint_notification(notification));
    }
}

use std::{error::Error, io, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use minhas_financas::{
    Config, PasswordHash, Transaction, TransactionFilter, TransactionId, TransactionService,
    TransactionStatus, TransactionType, User, UserID, UserService, setup_logging,
    stores::sqlite::{SQLiteTransactionStore, SQLiteUserStore},
};

/// Manage your monthly income and expenses from the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new user. The password is read from the terminal.
    Register {
        /// The name to show for the user.
        #[arg(long)]
        name: String,
        /// The email address to log in with.
        #[arg(long)]
        email: String,
    },
    /// Check a user's email and password.
    LogIn {
        /// The email address the user registered with.
        #[arg(long)]
        email: String,
    },
    /// Record a new transaction. New transactions are always pending.
    Add(AddArgs),
    /// Show a single transaction.
    Get {
        /// The ID of the transaction.
        #[arg(long)]
        id: TransactionId,
    },
    /// List the transactions that match every given option.
    Search(SearchArgs),
    /// Confirm or cancel a transaction.
    SetStatus {
        /// The ID of the transaction.
        #[arg(long)]
        id: TransactionId,
        /// PENDING, CONFIRMED or CANCELLED.
        #[arg(long)]
        status: TransactionStatus,
    },
    /// Remove a transaction.
    Delete {
        /// The ID of the transaction.
        #[arg(long)]
        id: TransactionId,
    },
}

#[derive(Args, Debug)]
struct AddArgs {
    /// What the money was for.
    #[arg(long)]
    description: String,
    /// The month, 1 to 12.
    #[arg(long)]
    month: u32,
    /// The four digit year.
    #[arg(long)]
    year: i32,
    /// The ID of the user that owns the transaction.
    #[arg(long)]
    user_id: i64,
    /// The amount, e.g. 1234.56.
    #[arg(long)]
    value: Decimal,
    /// INCOME or EXPENSE.
    #[arg(long = "type")]
    transaction_type: TransactionType,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Text the description must contain, ignoring case.
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    month: Option<u32>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    user_id: Option<i64>,
    #[arg(long)]
    value: Option<Decimal>,
    #[arg(long = "type")]
    transaction_type: Option<TransactionType>,
    #[arg(long)]
    status: Option<TransactionStatus>,
}

impl From<SearchArgs> for TransactionFilter {
    fn from(args: SearchArgs) -> Self {
        TransactionFilter {
            description: args.description,
            month: args.month,
            year: args.year,
            user_id: args.user_id.map(UserID::new),
            value: args.value,
            transaction_type: args.transaction_type,
            status: args.status,
            ..Default::default()
        }
    }
}

/// A user as shown on the terminal, without the password hash.
#[derive(Serialize)]
struct UserView<'a> {
    id: UserID,
    name: &'a str,
    email: &'a str,
}

impl<'a> From<&'a User> for UserView<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id,
            name: &user.name,
            email: &user.email,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = setup_logging(cli.config.log_path.as_deref()) {
        print_error(format!("Could not open the log file: {error}"));
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            print_error(error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let connection = cli.config.open_database()?;

    match cli.command {
        Command::Register { name, email } => {
            register(&connection, &name, &email, cli.config.password_cost)
        }
        Command::LogIn { email } => {
            let password = rpassword::prompt_password("Password: ")?;
            let user = UserService::new(SQLiteUserStore::new(&connection))
                .authenticate(&email, &password)?;

            print_json(&UserView::from(&user))
        }
        Command::Add(args) => {
            let transaction = Transaction::build(&args.description)
                .month(args.month)
                .year(args.year)
                .user_id(UserID::new(args.user_id))
                .value(args.value)
                .transaction_type(args.transaction_type)
                .finalize();
            let saved = transaction_service(&connection).save(transaction)?;

            print_json(&saved)
        }
        Command::Get { id } => {
            let transaction = get_transaction(&connection, id)?;

            print_json(&transaction)
        }
        Command::Search(args) => {
            let transactions = transaction_service(&connection).search(&args.into())?;

            print_json(&transactions)
        }
        Command::SetStatus { id, status } => {
            let mut transaction = get_transaction(&connection, id)?;
            let updated = transaction_service(&connection).update_status(&mut transaction, status)?;

            print_json(&updated)
        }
        Command::Delete { id } => {
            let transaction = get_transaction(&connection, id)?;
            transaction_service(&connection).delete(&transaction)?;

            println!("Deleted transaction {id}");

            Ok(())
        }
    }
}

fn transaction_service(connection: &Connection) -> TransactionService<SQLiteTransactionStore<'_>> {
    TransactionService::new(SQLiteTransactionStore::new(connection))
}

fn get_transaction(connection: &Connection, id: TransactionId) -> Result<Transaction, Box<dyn Error>> {
    transaction_service(connection)
        .get_by_id(id)?
        .ok_or_else(|| format!("no transaction with ID {id}").into())
}

fn register(
    connection: &Connection,
    name: &str,
    email: &str,
    password_cost: u32,
) -> Result<(), Box<dyn Error>> {
    let service = UserService::new(SQLiteUserStore::new(connection));

    // Checked again inside `register`, but this avoids a wasted password prompt.
    service.validate_email(email)?;

    let Some(password) = prompt_new_password()? else {
        return Ok(());
    };
    let password_hash = PasswordHash::new(&password, password_cost)?;
    let user = service.register(User::build(name, email, password_hash))?;

    print_json(&UserView::from(&user))
}

/// Ask for a password twice until both entries match.
///
/// Returns `None` if the input ends before a password is entered.
fn prompt_new_password() -> Result<Option<String>, io::Error> {
    loop {
        let first_password = match rpassword::prompt_password("Enter a password: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(error) => return Err(error),
        };

        let second_password = match rpassword::prompt_password("Enter the same password again: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(error) => return Err(error),
        };

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        return Ok(Some(first_password));
    }
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}

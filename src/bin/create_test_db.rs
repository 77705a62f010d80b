use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;

use minhas_financas::{
    PasswordHash, Transaction, TransactionService, TransactionStatus, TransactionType, User,
    UserService, db::initialize,
    stores::sqlite::{SQLiteTransactionStore, SQLiteUserStore},
};

/// A utility for creating a test database for minhas_financas.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize(&conn)?;

    println!("Creating test user...");

    let password_hash = PasswordHash::new("test", PasswordHash::DEFAULT_COST)?;
    let user = UserService::new(SQLiteUserStore::new(&conn)).register(User::build(
        "Test User",
        "test@test.com",
        password_hash,
    ))?;

    println!("Creating sample transactions...");

    let transactions = TransactionService::new(SQLiteTransactionStore::new(&conn));
    let samples = [
        ("Salary", 1, Decimal::new(500000, 2), TransactionType::Income),
        ("Rent", 1, Decimal::new(180000, 2), TransactionType::Expense),
        ("Groceries", 1, Decimal::new(64550, 2), TransactionType::Expense),
        ("Salary", 2, Decimal::new(500000, 2), TransactionType::Income),
        ("Rent", 2, Decimal::new(180000, 2), TransactionType::Expense),
    ];

    for (description, month, value, transaction_type) in samples {
        let mut transaction = transactions.save(
            Transaction::build(description)
                .month(month)
                .year(2025)
                .user_id(user.id)
                .value(value)
                .transaction_type(transaction_type)
                .finalize(),
        )?;

        if month == 1 {
            transactions.update_status(&mut transaction, TransactionStatus::Confirmed)?;
        }
    }

    println!("Success! Log in with test@test.com and the password 'test'.");

    Ok(())
}

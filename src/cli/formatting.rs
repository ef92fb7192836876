use comfy_table::Table;

use crate::amounts::Figure;
use crate::session::{BalanceLine, DecodedLine, LedgerScreen, TransactionLine};

const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_ledger_screen(screen: &LedgerScreen) -> String {
    let mut components = vec![title(&format!("Interest rate: {}", screen.interest_rate))];

    let transactions = if screen.transactions.is_empty() {
        "No operations".to_string()
    } else {
        transactions_table(&screen.transactions)
    };
    components.push(format!("{}\n{}", title("Transactions"), transactions));

    if !screen.decoded.is_empty() {
        components.push(format!(
            "{}\n{}",
            title("Decoded codes"),
            decoded_table(&screen.decoded)
        ));
    }

    let balances = if screen.balances.is_empty() {
        "No accounts".to_string()
    } else {
        balances_table(&screen.balances)
    };
    components.push(format!("{}\n{}", title("Balances"), balances));

    components.push(format!("Release: {}", env!("RELEASE")));

    components.join("\n\n")
}

fn transactions_table(lines: &[TransactionLine]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Account",
        "Name",
        "Operation",
        "Confirmation code",
        "Outcome",
        "Balance",
        "Local time",
    ]);

    for line in lines {
        let mut row = vec![
            line.operation.account_number().to_string(),
            line.full_name.clone().unwrap_or_else(|| "-".to_string()),
            line.operation.label(),
        ];
        match &line.result {
            Ok(code) => row.extend([
                code.to_string(),
                code.transaction_type().description().to_string(),
            ]),
            Err(error) => row.extend(["-".to_string(), error.to_string()]),
        }
        row.push(line.balance.as_ref().map(figure).unwrap_or_else(|| "-".to_string()));
        row.push(match &line.result {
            Ok(code) => code.transaction_time_local(),
            Err(_) => "-".to_string(),
        });
        table.add_row(row);
    }

    table.to_string()
}

fn decoded_table(lines: &[DecodedLine]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Code",
        "Type",
        "Account",
        "Sequence id",
        "UTC time",
        "Local time",
    ]);

    for line in lines {
        let row = match &line.result {
            Ok(code) => vec![
                line.code.clone(),
                code.transaction_type().description().to_string(),
                code.account_number().to_string(),
                code.sequence_id().to_string(),
                code.transaction_time_utc().format(LOCAL_TIME_FORMAT).to_string(),
                code.transaction_time_local(),
            ],
            Err(error) => {
                let mut row = vec![line.code.clone(), error.to_string()];
                row.extend((0..4).map(|_| "-".to_string()));
                row
            }
        };
        table.add_row(row);
    }

    table.to_string()
}

fn balances_table(lines: &[BalanceLine]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Account",
        "Name",
        "Timezone",
        "Balance",
        "Last confirmation code",
    ]);

    for line in lines {
        table.add_row(vec![
            line.account_number.to_string(),
            line.full_name.clone(),
            line.timezone.clone(),
            figure(&line.balance),
            line.last_confirmation_code
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    table.to_string()
}

fn figure(figure: &Figure) -> String {
    format!("{:.2}", figure)
}

fn title(string: &str) -> String {
    let string_length = string.len();
    string.to_string() + "\n" + &"=".repeat(string_length)
}

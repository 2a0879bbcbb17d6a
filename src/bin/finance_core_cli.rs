use std::process;

fn main() {
    match finance_core::cli::run_cli() {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

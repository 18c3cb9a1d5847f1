//! Day picker CLI application.
//!
//! # Usage
//! ```ignore
//! daypicker                           // Current month
//! daypicker 9 2015 --select 2015-09-19
//! daypicker 2015                      // Twelve months of 2015
//! daypicker -n 3 --fixed-weeks        // Three months, six rows each
//! ```

use daypicker::args::{Args, get_display_date};
use daypicker::formatter::print_months;
use daypicker::logging;
use daypicker::types::CalContext;

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("daypicker: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> daypicker::Result<()> {
    let ctx = CalContext::new(args)?;
    let (start, default_count) = get_display_date(args)?;
    let count = args.months_count.unwrap_or(default_count);
    print_months(&ctx, start, count);
    Ok(())
}

use colored::Colorize;

const BANNER: &str = r"
 ┌┬┐┌─┐┬─┐┌┬┐┌┬┐┌─┐┌─┐┬┌─
  │ ├┤ ├┬┘│││ ││├┤ │  ├┴┐
  ┴ └─┘┴└─┴ ┴─┴┘└─┘└─┘┴ ┴";

pub fn print_banner_with_version() {
    println!("{}", BANNER.cyan().bold());
    println!();
    println!(
        "  {} {}",
        env!("CARGO_PKG_NAME").bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).green()
    );
    println!("  {}", env!("CARGO_PKG_DESCRIPTION").dimmed());
}

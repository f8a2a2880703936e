use crate::errors::AppResult;
use crate::types::Chain;
use clap::Args;

#[derive(Args)]
pub struct ChainsCommand {}

impl ChainsCommand {
    pub fn run(&self) -> AppResult<()> {
        println!("{:<12} {:>10}  {:<10} ICON", "CHAIN", "CHAIN ID", "URL PREFIX");
        for chain in Chain::ALL {
            println!(
                "{:<12} {:>10}  {:<10} {}",
                chain.name(),
                chain.chain_id(),
                chain.url_prefix(),
                chain.icon()
            );
        }
        Ok(())
    }
}

use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = brainhub_api::Args::parse();

	brainhub_api::run(args).await
}

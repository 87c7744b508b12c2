mod command;
mod player;
mod record;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}

//! Line-driven terminal front end for [`App`].

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::app::{App, Flow};
use crate::error::Error;
use crate::external::DynRoutingApi;

/// Reads commands from stdin until `quit` or end of input, redrawing the
/// current screen after each one.
pub async fn run(api: DynRoutingApi) -> Result<(), Error> {
    let mut app = App::new(api);
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    draw(&mut stdout, &app).await?;

    while let Some(line) = lines.next_line().await? {
        if app.handle(&line).await == Flow::Quit {
            break;
        }

        draw(&mut stdout, &app).await?;
    }

    Ok(())
}

async fn draw(stdout: &mut io::Stdout, app: &App) -> Result<(), Error> {
    let frame = format!("\n{}\n> ", app.render());
    stdout.write_all(frame.as_bytes()).await?;
    stdout.flush().await?;

    Ok(())
}

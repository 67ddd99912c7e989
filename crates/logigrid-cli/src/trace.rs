//! Module that contains the construction of the [`tracing::Subscriber`] used
//! by `logigrid`'s command line interface.

use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::{time::uptime, MakeWriter};

/// Create a [`tracing_subscriber::Subscriber`] for the CLI, with verbosity
/// controlled by the number of times `-v` was passed on the command line.
pub(crate) fn create_subscriber<W>(verbose: u8, make_writer: W, ansi: bool) -> impl Subscriber
where
	W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::fmt()
		.with_max_level(match verbose {
			0 => Level::WARN,
			1 => Level::INFO,
			2 => Level::DEBUG,
			_ => Level::TRACE,
		})
		.with_writer(make_writer)
		.with_ansi(ansi)
		.with_timer(uptime())
		.finish()
}

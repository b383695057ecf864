//! [`Terminal`] implementation of the [`Navigator`].

use std::io::{self, Write as _};

use common::operations::Perform;
use service::infra::{
    navigator::{self, Redirect},
    Navigator,
};
use tracerr::Traced;
use tracing as log;

/// [`Navigator`] asking the user to open the [`Redirect`] URL in a browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminal;

impl Navigator<Perform<Redirect>> for Terminal {
    type Ok = ();
    type Err = Traced<navigator::Error>;

    async fn execute(
        &self,
        Perform(redirect): Perform<Redirect>,
    ) -> Result<Self::Ok, Self::Err> {
        log::debug!("handing `{redirect}` over to the user");

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "Open the following URL in your browser to continue:")
            .and_then(|()| writeln!(stdout, "{redirect}"))
            .and_then(|()| stdout.flush())
            .map_err(|e| tracerr::new!(navigator::Error::Io(e)))
    }
}

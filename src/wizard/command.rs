use futures::future::BoxFuture;
use std::future::Future;

/// Side effect requested by [`SurveyWizard::update`](super::SurveyWizard::update)
///
/// Nothing runs until `dispatch` awaits it, so a returned command can be
/// inspected or dropped without touching the network.
pub enum Command<Msg> {
    None,
    /// Await the future and feed its message back into `update`
    Perform(BoxFuture<'static, Msg>),
}

impl<Msg> Command<Msg> {
    /// Wrap a future whose output becomes a message through `to_msg`
    pub fn perform<F, T>(future: F, to_msg: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        Msg: Send + 'static,
    {
        Command::Perform(Box::pin(async move { to_msg(future.await) }))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }
}

impl<Msg> Default for Command<Msg> {
    fn default() -> Self {
        Command::None
    }
}

impl<Msg> std::fmt::Debug for Command<Msg> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::None => f.write_str("None"),
            Command::Perform(_) => f.write_str("Perform(..)"),
        }
    }
}

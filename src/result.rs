/// Outcome of a best-effort notification.
///
/// `Unconfirmed` only means the provider did not acknowledge the request as expected. The
/// request may still have taken effect upstream, so callers should not treat it as "nothing
/// happened".
#[must_use = "an unconfirmed delivery should at least be noticed"]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery<T> {
    Confirmed(T),
    Unconfirmed,
}

impl<T> Delivery<T> {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    /// Converts into an `Option`, discarding the distinction between failure modes
    pub fn confirmed(self) -> Option<T> {
        match self {
            Self::Confirmed(value) => Some(value),
            Self::Unconfirmed => None,
        }
    }
}

impl<T> From<Option<T>> for Delivery<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unconfirmed, Self::Confirmed)
    }
}

/// Absorbs errors at the notifier boundary: logs them, records them on the current span and
/// turns them into [`Delivery::Unconfirmed`].
pub(crate) trait BestEffort<T>: Sized {
    fn best_effort<F: FnOnce() -> String>(self, describe: F) -> Delivery<T>;
}

impl<T> BestEffort<T> for anyhow::Result<T> {
    fn best_effort<F: FnOnce() -> String>(self, describe: F) -> Delivery<T> {
        match self {
            Ok(value) => Delivery::Confirmed(value),
            Err(e) => {
                log::error!("{}: {e:?}", describe());
                tracing::Span::current().record("error", tracing::field::display(format!("{e:#}")));
                Delivery::Unconfirmed
            }
        }
    }
}

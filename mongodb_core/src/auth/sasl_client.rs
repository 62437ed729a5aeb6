/// The client half of one SASL mechanism.
///
/// An instance serves a single conversation. The conversation engine calls it
/// strictly in sequence: `start` once, then `next` for every server challenge,
/// checking `completed` along the way.
#[cfg_attr(test, mockall::automock)]
pub trait SaslClient: Send {
    /// Returns the mechanism name and the initial payload.
    fn start(&mut self) -> anyhow::Result<(String, Vec<u8>)>;

    /// Answers a server challenge.
    fn next(&mut self, challenge: &[u8]) -> anyhow::Result<Vec<u8>>;

    /// True once the client is satisfied the exchange is complete, whatever
    /// the server says.
    fn completed(&self) -> bool;

    /// Releases key material and other per-conversation state.
    ///
    /// Called exactly once when the conversation ends, however it ends.
    fn close(&mut self) {}
}

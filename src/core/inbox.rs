use std::collections::HashSet;
use std::str::FromStr;

use crate::core::filters::{contains_ignore_case, search_term};
use crate::models::{Message, MessageEnvelope};

/// One inbox facet selectable through the `sorting` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InboxFacet {
    Received,
    Sent,
    Read,
    Unread,
    All,
}

impl FromStr for InboxFacet {
    type Err = ();

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_lowercase().as_str() {
            "received" => Ok(InboxFacet::Received),
            "sent" => Ok(InboxFacet::Sent),
            "read" => Ok(InboxFacet::Read),
            "unread" => Ok(InboxFacet::Unread),
            "all" => Ok(InboxFacet::All),
            _ => Err(()),
        }
    }
}

impl InboxFacet {
    /// Whether a message belongs to this facet for the given viewer
    ///
    /// Read state only counts on the receiving side.
    #[inline]
    pub fn matches(self, message: &Message, viewer_id: i64) -> bool {
        let received = message.receiver_id == viewer_id;
        let sent = message.sender_id == viewer_id;

        match self {
            InboxFacet::Received => received,
            InboxFacet::Sent => sent,
            InboxFacet::Read => received && message.is_read,
            InboxFacet::Unread => received && !message.is_read,
            InboxFacet::All => received || sent,
        }
    }
}

/// Parse facet tokens, dropping unknown ones and duplicates
///
/// Falls back to `received` when nothing usable remains.
pub fn parse_facets<I, S>(tokens: I) -> Vec<InboxFacet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut facets = Vec::new();
    for token in tokens {
        if let Ok(facet) = token.as_ref().parse::<InboxFacet>() {
            if !facets.contains(&facet) {
                facets.push(facet);
            }
        }
    }

    if facets.is_empty() {
        facets.push(InboxFacet::Received);
    }
    facets
}

/// Inbox view for one viewer
///
/// The requested facets are OR-ed into a single predicate, AND-ed with the
/// search term, applied once, and the survivors are sorted once by
/// `sent_date` descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxQuery {
    viewer_id: i64,
    facets: Vec<InboxFacet>,
    search: Option<String>,
}

impl InboxQuery {
    pub fn new<I, S>(viewer_id: i64, tokens: I, search: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            viewer_id,
            facets: parse_facets(tokens),
            search: search_term(search),
        }
    }

    pub fn viewer_id(&self) -> i64 {
        self.viewer_id
    }

    pub fn facets(&self) -> &[InboxFacet] {
        &self.facets
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Search over subject, body and the other party's first name and username
    pub fn matches_search(&self, envelope: &MessageEnvelope) -> bool {
        let Some(term) = &self.search else {
            return true;
        };

        let message = &envelope.message;
        let (first_name, username) = envelope.counterparty_names(self.viewer_id);

        contains_ignore_case(&message.subject, term)
            || contains_ignore_case(&message.body, term)
            || contains_ignore_case(first_name, term)
            || contains_ignore_case(username, term)
    }

    pub fn matches(&self, envelope: &MessageEnvelope) -> bool {
        self.facets
            .iter()
            .any(|facet| facet.matches(&envelope.message, self.viewer_id))
            && self.matches_search(envelope)
    }

    /// Filter, deduplicate and order a set of messages
    pub fn apply(&self, messages: Vec<MessageEnvelope>) -> Vec<MessageEnvelope> {
        let mut seen = HashSet::new();
        let mut visible: Vec<MessageEnvelope> = messages
            .into_iter()
            .filter(|envelope| self.matches(envelope))
            .filter(|envelope| seen.insert(envelope.message.id))
            .collect();

        visible.sort_by(|a, b| {
            b.message
                .sent_date
                .cmp(&a.message.sent_date)
                .then_with(|| b.message.id.cmp(&a.message.id))
        });

        visible
    }
}

/// Open a message as `viewer_id`
///
/// Flips `is_read` when the receiver opens an unread message. Returns
/// whether anything changed; repeat opens and opens by the sender are no-ops.
pub fn open_message(message: &mut Message, viewer_id: i64) -> bool {
    if message.receiver_id == viewer_id && !message.is_read {
        message.is_read = true;
        return true;
    }
    false
}

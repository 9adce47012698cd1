use shopstream_sdk::objects::EventCategory;

/// Which topic each event category is published to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicRouting {
    /// Customer events on `customers`, everything else on `orders`.
    Split { orders: String, customers: String },
    /// Every event on one topic.
    Shared { topic: String },
}

impl TopicRouting {
    pub fn topic_for(&self, category: EventCategory) -> &str {
        match (self, category) {
            (TopicRouting::Split { customers, .. }, EventCategory::Customer) => customers.as_str(),
            (TopicRouting::Split { orders, .. }, _) => orders.as_str(),
            (TopicRouting::Shared { topic }, _) => topic.as_str(),
        }
    }

    /// Every distinct topic, for logging.
    pub fn topics(&self) -> Vec<&str> {
        match self {
            TopicRouting::Split { orders, customers } if orders == customers => {
                vec![orders.as_str()]
            }
            TopicRouting::Split { orders, customers } => vec![orders.as_str(), customers.as_str()],
            TopicRouting::Shared { topic } => vec![topic.as_str()],
        }
    }
}

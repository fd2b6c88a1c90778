use crate::*;

/// Lifecycle stage of a topic.
///
/// `prepare` admits key registration, `start` admits submissions, `finish`
/// is terminal and admits nothing.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Prepare,
    Start,
    Finish,
}

impl Stage {
    /// Whether a topic may move from this stage to `next`.
    ///
    /// Only the forward chain prepare -> start -> finish is allowed.
    /// Re-setting the current stage is an idempotent overwrite.
    pub fn can_transition_to(self, next: Stage) -> bool {
        match (self, next) {
            (current, next) if current == next => true,
            (Stage::Prepare, Stage::Start) => true,
            (Stage::Start, Stage::Finish) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Stage::Prepare => "prepare",
            Stage::Start => "start",
            Stage::Finish => "finish",
        };
        write!(f, "{}", name)
    }
}

/// Topic configuration record, stored at the topic's own state key.
///
/// Doubles as the `setStage` operation payload.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TopicConfig {
    pub topic: String,
    pub stage: Stage,
}

/// Configure a topic's stage, validating the transition against the
/// current record. The first configuration of a topic must be `prepare`.
pub fn set_stage<S: StateStore>(store: &mut S, config: &TopicConfig) -> Result<(), Error> {
    let current = read_topic(store, &config.topic)?;

    let allowed = match &current {
        None => config.stage == Stage::Prepare,
        Some(existing) => existing.stage.can_transition_to(config.stage),
    };
    if !allowed {
        return Err(Error::InvalidStageTransition {
            topic: config.topic.clone(),
            from: current.map(|c| c.stage),
            to: config.stage,
        });
    }

    let packed =
        serde_json::to_vec(config).expect("ringvote: unexpected error packing topic record");
    store.put(&topic_key(&config.topic), packed)?;

    tracing::info!(topic = %config.topic, stage = %config.stage, "topic stage configured");
    Ok(())
}

/// Admission-control primitive used by every stage-gated operation.
///
/// Fails with `TopicNotFound` if the topic was never configured and with
/// `StageMismatch` if the actual stage differs from `expected`.
pub fn check_stage<S: StateStore>(store: &S, topic: &str, expected: Stage) -> Result<(), Error> {
    let config = read_topic(store, topic)?.ok_or_else(|| Error::TopicNotFound(topic.to_string()))?;

    if config.stage != expected {
        return Err(Error::StageMismatch {
            topic: topic.to_string(),
            expected,
            actual: config.stage,
        });
    }
    Ok(())
}

fn read_topic<S: StateStore>(store: &S, topic: &str) -> Result<Option<TopicConfig>, Error> {
    match store.get(&topic_key(topic))? {
        Some(packed) => {
            let config = serde_json::from_slice(&packed).map_err(|_| {
                Error::StorageFailure(format!("corrupt topic record for {}", topic))
            })?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}

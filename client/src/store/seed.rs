// Example conversations shown on first start

use super::model::{AgentType, Conversation, FileSummary, Message};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

const CLIMATE_ANSWER: &str = r#"# Climate Change Impacts

Climate change leads to several major impacts globally:

1. **Rising temperatures** - Global warming is causing average temperatures to increase worldwide
2. **Sea level rise** - Melting ice caps and thermal expansion are raising sea levels
3. **Extreme weather events** - More frequent and intense storms, floods, and droughts
4. **Ecosystem disruption** - Changes in habitats affecting plant and animal species

## Regional Variations

| Region | Primary Impacts |
|--------|----------------|
| Arctic | Rapid ice loss, permafrost thawing |
| Coastal | Flooding, erosion, saltwater intrusion |
| Tropical | Changing rainfall patterns, extreme heat |
| Arid | Increased drought, water scarcity |

> "Climate change is the defining crisis of our time and it is happening even more quickly than we feared." - UN"#;

const LEARNING_ANSWER: &str = r#"# Supervised vs Unsupervised Learning

Based on your documents, here's a comparison:

## Supervised Learning

Supervised learning uses **labeled data** to train models that make predictions.

- Requires labeled training data
- Has a clear target variable
- Performance can be measured precisely

## Unsupervised Learning

Unsupervised learning identifies **patterns in unlabeled data**.

- No target variable
- Focuses on finding structure or relationships
- Common algorithms: K-means, PCA, autoencoders

> Semi-supervised learning combines both approaches."#;

const QUANTUM_ANSWER: &str = r#"# Recent Quantum Computing Developments

Based on my web search, here are the latest breakthroughs:

## Error Correction Advances
- **Surface code improvements** reduce the overhead of error correction
- **Logical qubit demonstrations** with error rates below the fault-tolerance threshold

## Hardware Improvements
1. **Increased qubit counts** - processors with 100+ qubits
2. **Reduced error rates** - better coherence times and gate fidelities

```
Quantum Advantage Domains:
- Chemistry simulation
- Optimization problems
- Cryptography
```"#;

/// Three example conversations (one per agent type), timestamped relative to `now_ms`
pub(crate) fn example_conversations(now_ms: i64) -> Vec<Conversation> {
    vec![
        Conversation {
            id: "conv-1".to_string(),
            title: "Climate change impacts".to_string(),
            agent_type: AgentType::Global,
            messages: vec![
                Message::user("What are the main impacts of climate change?"),
                Message::assistant(CLIMATE_ANSWER),
            ],
            timestamp: now_ms - 2 * HOUR_MS,
            files: Some(FileSummary::from_named_sizes(vec![
                ("climate_report.pdf".to_string(), 2_000_000),
                ("global_warming_data.csv".to_string(), 1_500_000),
            ])),
        },
        Conversation {
            id: "conv-2".to_string(),
            title: "Machine learning basics".to_string(),
            agent_type: AgentType::Rag,
            messages: vec![
                Message::user(
                    "Explain the difference between supervised and unsupervised learning",
                ),
                Message::assistant(LEARNING_ANSWER),
            ],
            timestamp: now_ms - DAY_MS,
            files: Some(FileSummary::from_named_sizes(vec![
                ("ml_textbook.pdf".to_string(), 5_000_000),
                ("algorithms.docx".to_string(), 1_200_000),
                ("training_data.xlsx".to_string(), 2_000_000),
            ])),
        },
        Conversation {
            id: "conv-3".to_string(),
            title: "Latest tech news".to_string(),
            agent_type: AgentType::WebSearch,
            messages: vec![
                Message::user("What are the latest developments in quantum computing?"),
                Message::assistant(QUANTUM_ANSWER),
            ],
            timestamp: now_ms - 3 * DAY_MS,
            files: None,
        },
    ]
}

//! Skill variant table for the hard matcher and concept table for the
//! statistical similarity fallback

use std::collections::HashMap;
use std::sync::LazyLock;

/// Spellings that name the same skill. Every entry is lower-case.
const SKILL_VARIANTS: &[&[&str]] = &[
    &["javascript", "js", "ecmascript", "es6"],
    &["typescript", "ts"],
    &["node.js", "nodejs", "node js"],
    &["react", "react.js", "reactjs"],
    &["vue", "vue.js", "vuejs"],
    &["angular", "angularjs", "angular.js"],
    &["next.js", "nextjs"],
    &["golang", "go lang"],
    &["c#", "csharp", "c sharp"],
    &["c++", "cpp"],
    &[".net", "dotnet", "asp.net"],
    &["python", "python3", "py"],
    &["postgresql", "postgres", "psql"],
    &["mysql", "my sql"],
    &["sql server", "mssql", "ms sql"],
    &["mongodb", "mongo"],
    &["kubernetes", "k8s"],
    &["amazon web services", "aws"],
    &["google cloud", "gcp", "google cloud platform"],
    &["azure", "microsoft azure"],
    &["ci/cd", "cicd", "ci cd", "continuous integration"],
    &["machine learning", "ml"],
    &["deep learning", "dl"],
    &["artificial intelligence", "ai"],
    &["natural language processing", "nlp"],
    &["computer vision", "cv"],
    &["scikit-learn", "sklearn", "scikit learn"],
    &["tensorflow", "tf"],
    &["rest", "rest api", "restful", "restful api"],
    &["graphql", "graph ql"],
    &["power bi", "powerbi"],
    &["user experience", "ux"],
    &["user interface", "ui"],
    &["object oriented programming", "oop", "object-oriented programming"],
    &["data structures and algorithms", "dsa"],
    &["amazon s3", "s3"],
    &["html", "html5"],
    &["css", "css3"],
    &["shell scripting", "bash", "shell"],
    &["microservices", "micro-services", "microservice"],
];

/// Aliases that are also everyday words or initialisms with other common
/// meanings ("CV attached", "the rest of", "worked at Shell"). They are
/// matched only when the requirement itself is spelled that way.
const AMBIGUOUS_ALIASES: &[&str] = &["cv", "rest", "shell", "dl", "tf", "ts", "ui", "ux", "py"];

/// Topic groups for the bag-of-words fallback. Tokens in one group share a
/// concept feature, so related wording overlaps without a literal match.
const CONCEPT_GROUPS: &[(&str, &[&str])] = &[
    (
        "concept:distributed",
        &[
            "distributed", "scalable", "scalability", "scale", "scaling", "backend",
            "microservices", "microservice", "services", "cluster", "clusters",
            "replication", "sharding", "throughput", "latency", "concurrency",
            "systems", "kafka", "queue", "queues",
        ],
    ),
    (
        "concept:data",
        &[
            "sql", "database", "databases", "postgresql", "postgres", "mysql",
            "mongodb", "nosql", "query", "queries", "warehouse", "etl", "pipeline",
            "pipelines", "schema", "analytics", "data",
        ],
    ),
    (
        "concept:ml",
        &[
            "machine", "learning", "ml", "model", "models", "training", "neural",
            "tensorflow", "pytorch", "sklearn", "regression", "classification",
            "prediction", "nlp", "ai",
        ],
    ),
    (
        "concept:cloud",
        &[
            "cloud", "aws", "azure", "gcp", "docker", "kubernetes", "k8s",
            "container", "containers", "terraform", "devops", "deployment",
            "infrastructure", "serverless",
        ],
    ),
    (
        "concept:frontend",
        &[
            "frontend", "react", "vue", "angular", "javascript", "typescript",
            "html", "css", "ui", "ux", "web", "browser", "responsive",
        ],
    ),
    (
        "concept:programming",
        &[
            "python", "java", "rust", "golang", "c++", "c#", "programming",
            "developer", "development", "software", "engineer", "engineering",
            "coding", "code",
        ],
    ),
    (
        "concept:quality",
        &[
            "testing", "tests", "test", "qa", "unit", "integration", "tdd",
            "pytest", "junit", "selenium", "quality", "automation",
        ],
    ),
    (
        "concept:leadership",
        &[
            "lead", "leadership", "led", "managed", "manager", "mentoring",
            "mentored", "team", "stakeholders", "collaboration", "communication",
            "agile", "scrum",
        ],
    ),
];

static VARIANT_GROUP: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for (group_id, group) in SKILL_VARIANTS.iter().enumerate() {
        for &variant in group.iter() {
            index.insert(variant, group_id);
        }
    }
    index
});

static TOKEN_CONCEPT: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for (concept, tokens) in CONCEPT_GROUPS {
        for &token in tokens.iter() {
            index.entry(token).or_insert(*concept);
        }
    }
    index
});

/// The term itself followed by its known variants. `term` must already be canonical.
/// Ambiguous aliases are never added as variants of another spelling.
pub fn variants_of(term: &str) -> Vec<String> {
    let mut variants = vec![term.to_string()];

    if let Some(&group_id) = VARIANT_GROUP.get(term) {
        for &variant in SKILL_VARIANTS[group_id] {
            if variant != term && !AMBIGUOUS_ALIASES.contains(&variant) {
                variants.push(variant.to_string());
            }
        }
    }

    variants
}

/// Concept feature for a lower-cased token, if it belongs to a topic group
pub fn concept_of(token: &str) -> Option<&'static str> {
    TOKEN_CONCEPT.get(token).copied()
}

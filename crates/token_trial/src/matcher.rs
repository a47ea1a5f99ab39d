use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use token_rules::ast::{Action, Interaction, Rule};
use tracing::{debug, info};

use crate::controller::TokenModel;
use crate::evidence::{CentroidEvidence, ReleaseEvidence};
use crate::relation::PositionRelation;

/// What offering one interaction did to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Nothing pending accepted the interaction; no progress changed.
    Ignored,
    /// Some pending leaf accepted it but the node is not yet satisfied.
    Advanced,
    /// The node became satisfied.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Nothing,
    Leaf(Interaction),
    InOrder(Vec<usize>),
    InAnyOrder(Vec<usize>),
    FirstOrSecond(usize, usize),
}

/// A rule compiled into an arena of nodes addressed by index.
///
/// The plan never changes once compiled; matching state lives in [`Progress`].
/// Nodes are stored in post-order, so the subtree of node `n` occupies the
/// indices `starts[n]..=n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    nodes: Vec<Node>,
    starts: Vec<usize>,
    root: usize,
}

/// Matching state over a [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    satisfied: Vec<bool>,
    /// Index of the first unsatisfied child, for `InOrder` nodes.
    cursor: Vec<usize>,
    /// Leaves in the order they were satisfied.
    history: Vec<usize>,
}

impl Progress {
    pub fn is_satisfied(&self, node: usize) -> bool {
        self.satisfied.get(node).copied().unwrap_or(false)
    }

    pub fn satisfied_leaves(&self) -> &[usize] {
        &self.history
    }
}

impl Plan {
    pub fn compile(rule: &Rule) -> Self {
        let mut plan = Plan {
            nodes: Vec::new(),
            starts: Vec::new(),
            root: 0,
        };
        plan.root = plan.push(rule);
        plan
    }

    // Children are pushed before their parent.
    fn push(&mut self, rule: &Rule) -> usize {
        let start = self.nodes.len();
        let node = match rule {
            Rule::DoNothing => Node::Nothing,
            Rule::Leaf(interaction) => Node::Leaf(interaction.clone()),
            Rule::InOrder(children) => {
                Node::InOrder(children.iter().map(|c| self.push(c)).collect())
            }
            Rule::InAnyOrder(children) => {
                Node::InAnyOrder(children.iter().map(|c| self.push(c)).collect())
            }
            Rule::FirstOrSecond(first, second) => {
                let first = self.push(first);
                let second = self.push(second);
                Node::FirstOrSecond(first, second)
            }
        };
        self.nodes.push(node);
        self.starts.push(start);
        self.nodes.len() - 1
    }

    /// Forgets leaves of a discarded alternative.
    fn discard(&self, progress: &mut Progress, branch: usize) {
        let subtree = self.starts[branch]..=branch;
        progress.history.retain(|leaf| !subtree.contains(leaf));
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The interaction a leaf node expects, `None` for combinators.
    pub fn interaction(&self, node: usize) -> Option<&Interaction> {
        match self.nodes.get(node) {
            Some(Node::Leaf(interaction)) => Some(interaction),
            _ => None,
        }
    }

    /// Progress with nothing matched yet. Empty combinators start satisfied.
    pub fn fresh_progress(&self) -> Progress {
        let mut progress = Progress {
            satisfied: vec![false; self.nodes.len()],
            cursor: vec![0; self.nodes.len()],
            history: Vec::new(),
        };
        for (id, node) in self.nodes.iter().enumerate() {
            progress.satisfied[id] = match node {
                Node::Nothing | Node::Leaf(_) => false,
                Node::InOrder(children) => {
                    skip_satisfied(children, &mut progress, id);
                    progress.cursor[id] == children.len()
                }
                Node::InAnyOrder(children) => children.iter().all(|c| progress.satisfied[*c]),
                Node::FirstOrSecond(first, second) => {
                    progress.satisfied[*first] || progress.satisfied[*second]
                }
            };
        }
        progress
    }

    /// Offers one interaction to the root.
    ///
    /// `relation` accompanies released tokens and lets a plain `touch` stand
    /// in for a pending directional leaf on the same token.
    pub fn offer(
        &self,
        progress: &mut Progress,
        interaction: &Interaction,
        relation: Option<&PositionRelation>,
        evidence: &dyn ReleaseEvidence,
    ) -> Offer {
        self.offer_node(self.root, progress, interaction, relation, evidence)
    }

    fn offer_node(
        &self,
        id: usize,
        progress: &mut Progress,
        interaction: &Interaction,
        relation: Option<&PositionRelation>,
        evidence: &dyn ReleaseEvidence,
    ) -> Offer {
        if progress.satisfied[id] {
            return Offer::Ignored;
        }
        match &self.nodes[id] {
            Node::Nothing => Offer::Ignored,
            Node::Leaf(expected) => {
                if accepts(expected, interaction, relation, evidence) {
                    progress.satisfied[id] = true;
                    progress.history.push(id);
                    Offer::Completed
                } else {
                    Offer::Ignored
                }
            }
            Node::InOrder(children) => {
                let current = children[progress.cursor[id]];
                match self.offer_node(current, progress, interaction, relation, evidence) {
                    Offer::Completed => {
                        skip_satisfied(children, progress, id);
                        if progress.cursor[id] == children.len() {
                            progress.satisfied[id] = true;
                            Offer::Completed
                        } else {
                            Offer::Advanced
                        }
                    }
                    other => other,
                }
            }
            Node::InAnyOrder(children) => {
                // Declaration order breaks ties between children.
                for child in children {
                    match self.offer_node(*child, progress, interaction, relation, evidence) {
                        Offer::Ignored => continue,
                        Offer::Advanced => return Offer::Advanced,
                        Offer::Completed => {
                            if children.iter().all(|c| progress.satisfied[*c]) {
                                progress.satisfied[id] = true;
                                return Offer::Completed;
                            }
                            return Offer::Advanced;
                        }
                    }
                }
                Offer::Ignored
            }
            Node::FirstOrSecond(first, second) => {
                let on_first = self.offer_node(*first, progress, interaction, relation, evidence);
                if on_first == Offer::Completed {
                    progress.satisfied[id] = true;
                    self.discard(progress, *second);
                    return Offer::Completed;
                }
                let on_second = self.offer_node(*second, progress, interaction, relation, evidence);
                if on_second == Offer::Completed {
                    progress.satisfied[id] = true;
                    self.discard(progress, *first);
                    return Offer::Completed;
                }
                if on_first == Offer::Advanced || on_second == Offer::Advanced {
                    Offer::Advanced
                } else {
                    Offer::Ignored
                }
            }
        }
    }
}

fn skip_satisfied(children: &[usize], progress: &mut Progress, id: usize) {
    while progress.cursor[id] < children.len() && progress.satisfied[children[progress.cursor[id]]] {
        progress.cursor[id] += 1;
    }
}

fn accepts(
    expected: &Interaction,
    incoming: &Interaction,
    relation: Option<&PositionRelation>,
    evidence: &dyn ReleaseEvidence,
) -> bool {
    if expected == incoming {
        return true;
    }
    let (
        Interaction::Single {
            token,
            action: Action::Touch,
        },
        Some(relation),
    ) = (incoming, relation)
    else {
        return false;
    };
    expected.action().is_directional()
        && expected.primary_token() == token
        && relation.released_token() == token
        && evidence.supports(expected, relation)
}

/// How a trial ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every required interaction happened.
    Satisfied,
    /// The host gave up waiting (e.g., a time limit elapsed).
    Expired,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Satisfied => write!(f, "satisfied"),
            Outcome::Expired => write!(f, "expired"),
        }
    }
}

/// Summary handed to the host when a trial concludes.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    pub rule: Rule,
    pub outcome: Outcome,
    /// Expected interactions, in the order they were satisfied.
    pub accepted: Vec<Interaction>,
    /// Interactions submitted before conclusion, accepted or not.
    pub submissions: usize,
    pub started_at: DateTime<Utc>,
    pub concluded_at: DateTime<Utc>,
}

impl TrialResult {
    pub fn satisfied(&self) -> bool {
        self.outcome == Outcome::Satisfied
    }

    pub fn response_time(&self) -> TimeDelta {
        self.concluded_at.signed_duration_since(self.started_at)
    }
}

/// Callback that ends the hosting trial.
pub type Conclusion = Box<dyn FnOnce(TrialResult) + Send>;

/// Consumes submitted interactions against a rule and concludes the trial
/// once the rule is satisfied.
pub struct Matcher<E = CentroidEvidence> {
    rule: Rule,
    plan: Plan,
    progress: Progress,
    evidence: E,
    conclusion: Option<Conclusion>,
    submissions: usize,
    started_at: DateTime<Utc>,
}

impl Matcher {
    pub fn new(rule: Rule, conclude: impl FnOnce(TrialResult) + Send + 'static) -> Self {
        Self::with_evidence(rule, CentroidEvidence, conclude)
    }
}

impl<E: ReleaseEvidence> Matcher<E> {
    pub fn with_evidence(
        rule: Rule,
        evidence: E,
        conclude: impl FnOnce(TrialResult) + Send + 'static,
    ) -> Self {
        let plan = Plan::compile(&rule);
        let progress = plan.fresh_progress();
        debug!(nodes = plan.len(), "compiled rule for matching");
        Matcher {
            rule,
            plan,
            progress,
            evidence,
            conclusion: Some(Box::new(conclude)),
            submissions: 0,
            started_at: Utc::now(),
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn is_satisfied(&self) -> bool {
        self.progress.is_satisfied(self.plan.root())
    }

    /// Whether the conclusion callback has fired.
    pub fn is_concluded(&self) -> bool {
        self.conclusion.is_none()
    }

    /// Offers one interaction; ignored once the trial has concluded.
    pub fn submit(
        &mut self,
        interaction: &Interaction,
        relation: Option<&PositionRelation>,
    ) -> Offer {
        if self.is_concluded() {
            debug!(%interaction, "trial already concluded, ignoring interaction");
            return Offer::Ignored;
        }
        self.submissions += 1;
        let offer = self
            .plan
            .offer(&mut self.progress, interaction, relation, &self.evidence);
        match offer {
            Offer::Ignored => debug!(%interaction, "interaction matched nothing pending"),
            _ => info!(%interaction, ?offer, "interaction accepted"),
        }
        if self.is_satisfied() {
            self.conclude(Outcome::Satisfied);
        }
        offer
    }

    /// Concludes a trial that is still waiting, with outcome `Expired`.
    /// Returns whether the conclusion fired.
    pub fn expire(&mut self) -> bool {
        if self.is_concluded() {
            return false;
        }
        self.conclude(Outcome::Expired);
        true
    }

    fn conclude(&mut self, outcome: Outcome) {
        let Some(conclusion) = self.conclusion.take() else {
            return;
        };
        let result = TrialResult {
            rule: self.rule.clone(),
            outcome,
            accepted: self
                .progress
                .satisfied_leaves()
                .iter()
                .filter_map(|leaf| self.plan.interaction(*leaf).cloned())
                .collect(),
            submissions: self.submissions,
            started_at: self.started_at,
            concluded_at: Utc::now(),
        };
        info!(%outcome, submissions = result.submissions, "trial concluded");
        conclusion(result);
    }
}

impl<E: ReleaseEvidence> TokenModel for Matcher<E> {
    fn submit_single(
        &mut self,
        interaction: Interaction,
        relation: Option<PositionRelation>,
    ) -> Offer {
        self.submit(&interaction, relation.as_ref())
    }

    fn submit_dual(&mut self, interaction: Interaction) -> Offer {
        self.submit(&interaction, None)
    }
}

impl<E: ReleaseEvidence + fmt::Debug> fmt::Debug for Matcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("rule", &self.rule)
            .field("progress", &self.progress)
            .field("evidence", &self.evidence)
            .field("concluded", &self.is_concluded())
            .field("submissions", &self.submissions)
            .finish_non_exhaustive()
    }
}

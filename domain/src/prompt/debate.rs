//! The prompt set driving a debate

use super::template::PromptTemplate;

/// Every template the debate engine renders.
///
/// Placeholders per template:
///
/// | Template                 | Placeholders |
/// |--------------------------|--------------|
/// | `master_assign_first`    | `topic` |
/// | `master_assign_second`   | none |
/// | `master_final`           | `talking_points`, `moderator_notes` |
/// | `moderator_agenda`       | `topic`, `debater_1_side`, `debater_2_side`, `n_talking_points`, `n_rounds`, `delimiter` |
/// | `moderator_evaluation`   | `talking_point`, `transcript` |
/// | `debater_1_instruction`  | `topic`, `side`, `talking_point`, `n_rounds` |
/// | `debater_2_instruction`  | `topic`, `side`, `talking_point`, `n_rounds` |
/// | `own_answer`             | `utterance` |
/// | `opponent_statement`     | `utterance` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebatePrompts {
    pub master_system: PromptTemplate,
    pub master_assign_first: PromptTemplate,
    pub master_assign_second: PromptTemplate,
    pub master_final: PromptTemplate,
    pub moderator_system: PromptTemplate,
    pub moderator_agenda: PromptTemplate,
    pub moderator_evaluation: PromptTemplate,
    pub debater_1_system: PromptTemplate,
    pub debater_1_instruction: PromptTemplate,
    pub debater_2_system: PromptTemplate,
    pub debater_2_instruction: PromptTemplate,
    /// How a debater's own utterance is stored in its memory
    pub own_answer: PromptTemplate,
    /// How the opponent's utterance is relayed into a debater's memory
    pub opponent_statement: PromptTemplate,
}

const WORLD: &str = "You are part of an AI simulation. In this world different AIs debate one another.";

const MASTER_ASSIGN_FIRST: &str = r#"
Your tasks are the following:

1. Given a debate topic you will assign 2 debaters with their sides, what they need to argue for. These are not necessarily just affirmative or negative. One of them may need to argue for a certain product, service, TV show, book, political idea or theory while the other argues for the alternative. In these cases you will assign each debater one of the two options.

2. After the debate is finished, you'll be given the moderator's summaries for the different talking points that guided the debate. The moderator will have picked a winner for every talking point separately. Your task will be to pick a final winner. Give a short summary of each debater's strongest arguments and reasoning, then, based on the moderator's summaries and picked winners together with your own impressions, pick the final debate champion.

Here's the topic of today's debate: {topic}

First, describe what debater #1 will be arguing for. You're talking directly to debater #1: describe the topic and the side they will be taking. Do not help them by listing talking points or pro-contra arguments, simply articulate their task.

Debater #1's side:
"#;

const MASTER_ASSIGN_SECOND: &str = r#"
Secondly, describe what debater #2 will be arguing for. Make sure debater #1 and debater #2 are arguing for opposite sides. You're talking directly to debater #2: describe the topic and the side they will be taking. Do not help them by listing talking points or pro-contra arguments, simply articulate their task.

Debater #2's side:
"#;

const MASTER_FINAL: &str = r#"
Now you will be given the moderator's notes from each talking point. Your task now is to select the final champion of the debate, considering the moderator's summaries, the winners they selected and your own impressions.

Here are the talking points of the debate:
{talking_points}

Here are the moderator's notes:
{moderator_notes}

A quick overview of the topic and the chosen talking points, followed by your short summary of the debate highlighting each debater's strongest points, your chosen final debate champion and the reasons behind your choice:
"#;

const MODERATOR_AGENDA: &str = r#"
Here's the topic of the debate: {topic}

Here's the instruction debater #1 received: {debater_1_side}
And here's what debater #2 received as instruction: {debater_2_side}

You are an expert in this field. You're given two tasks:

1. First, using your deep understanding of the topic, come up with {n_talking_points} talking points or aspects the debaters should cover. These aspects will serve as the agenda, the different angles the debaters should be looking at when making their arguments.

2. Secondly, you will allow the debaters to discuss each aspect for {n_rounds} rounds. Once they reach the final round, you'll judge which debater presented more convincing arguments and pick a winner. You'll shortly summarize their reasoning to explain your decision. Then you'll move on to the next aspect.

So, given the topic, come up with exactly {n_talking_points} talking points / aspects. Only return the aspects, separated by "{delimiter}".

Debate talking points:
"#;

const MODERATOR_EVALUATION: &str = r#"
The current aspect of the debate is: {talking_point}.

You'll be given the transcript of the debate, outlining what each debater said as their arguments.
As the expert, your job is to pick a winner. Examine the debate transcript and summarize shortly what each debater talked about, what their main arguments and reasoning were. Do not summarize each round separately, simply give a general recap of the discussion. Then, based on whose arguments were more objective, thorough, factual and convincing, select a winner for the current aspect.

Here's the transcript of the debate:
{transcript}

Your expert evaluation of the debate and choice of winner:
"#;

const DEBATER_RULES: &str = "You do not need to address the audience or the moderator over and over. Focus on being concise, as long answers will lose the attention of the audience and the moderator. Make your arguments short and to the point. You can confront your opponent by asking them challenging questions, however you do not need to do so. If your opponent asks you a question, try not to dodge it. Remember, this is a conversation, not a speech.";

const DEBATER_INSTRUCTION_HEAD: &str = r#"
Here's the topic of the debate: {topic}

Here's your instruction: {side}

The current aspect of this topic that you are arguing for is {talking_point}.
You'll debate about this aspect for {n_rounds} rounds, meaning {n_rounds} back and forths with your opponent.
"#;

impl Default for DebatePrompts {
    fn default() -> Self {
        Self {
            master_system: system_for("You are the master of this world."),
            master_assign_first: MASTER_ASSIGN_FIRST.into(),
            master_assign_second: MASTER_ASSIGN_SECOND.into(),
            master_final: MASTER_FINAL.into(),
            moderator_system: system_for("You are the moderator of the debates."),
            moderator_agenda: MODERATOR_AGENDA.into(),
            moderator_evaluation: MODERATOR_EVALUATION.into(),
            debater_1_system: system_for("You are debater #1."),
            debater_1_instruction: PromptTemplate::new(format!(
                "{}\n{}\n\nAs debater #1 you'll be starting the discussion.\n",
                DEBATER_INSTRUCTION_HEAD, DEBATER_RULES
            )),
            debater_2_system: system_for("You are debater #2."),
            debater_2_instruction: PromptTemplate::new(format!(
                "{}\n{}\n\nDebater #1 has started the discussion; as debater #2 you are to respond and make your own arguments.\n",
                DEBATER_INSTRUCTION_HEAD, DEBATER_RULES
            )),
            own_answer: "{utterance}".into(),
            opponent_statement: "Here's what your opponent stated: {utterance}\n Now it's your turn, remember what you are arguing for and against!\n".into(),
        }
    }
}

fn system_for(identity: &str) -> PromptTemplate {
    PromptTemplate::new(format!("{} {}", WORLD, identity))
}

impl DebatePrompts {
    /// All templates with their field names, for validation and listing.
    pub fn entries(&self) -> [(&'static str, &PromptTemplate); 13] {
        [
            ("master_system", &self.master_system),
            ("master_assign_first", &self.master_assign_first),
            ("master_assign_second", &self.master_assign_second),
            ("master_final", &self.master_final),
            ("moderator_system", &self.moderator_system),
            ("moderator_agenda", &self.moderator_agenda),
            ("moderator_evaluation", &self.moderator_evaluation),
            ("debater_1_system", &self.debater_1_system),
            ("debater_1_instruction", &self.debater_1_instruction),
            ("debater_2_system", &self.debater_2_system),
            ("debater_2_instruction", &self.debater_2_instruction),
            ("own_answer", &self.own_answer),
            ("opponent_statement", &self.opponent_statement),
        ]
    }
}

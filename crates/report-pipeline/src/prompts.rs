//! Prompt text for both pipeline phases.
//!
//! One pipeline serves both supported report languages; only the prompt
//! text varies with the locale. The `[n_steps:X]` marker contract is part
//! of the segmentation instructions in every locale.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Portuguese,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "pt" | "portuguese" | "pt-br" => Ok(Locale::Portuguese),
            other => Err(format!("unknown locale {other:?} (expected en or pt)")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "en"),
            Locale::Portuguese => write!(f, "pt"),
        }
    }
}

const SEGMENTATION_EN: &str = "You will receive a series of information security logs originating from various sources such as firewalls, database monitoring systems, web server logs, and intrusion detection tools. \
Your task is to analyze these logs in chronological order to identify and describe the activities of a possible attacker through a LaTeX report. Please focus on:\n\n\
- Describing the attack actions, like in the example:\n\"[timestamp] The attacker accessed the system, opened a file, uploaded a webshell, authenticated with a service, ...\"\n\
- Determining the chronological sequence of events recorded in the logs.\n\
- Identifying anomalous patterns or suspicious activities in each set of logs.\n\
- Explaining the relevance of each suspicious activity in the context of the overall attack scenario.\n\
- Suggesting which techniques and tactics the attacker might be using based on the observed patterns.\n\
- Evaluating potential vulnerabilities or security flaws that the attacker exploited.\n\
- Proposing response or mitigation measures for the identified incidents.\n\n\
- Escape underlines in the LaTeX code.\n\
- Do not say anything other than the LaTeX report code.\n\
- No need to generate a preamble, just start from \\begin{document}.\n\
- Indicate the number of attack steps in the following format: [n_steps:X], where X is the number of steps. For example, if the attack involved port scanning, SQL injection, and privilege escalation, then X = 3, resulting in [n_steps:3]. After stating the number of steps, write an array with the names of the steps to justify your response. For example, [n_steps:3] [port_scan, sql_injection, privilege_escalation]";

const SEGMENTATION_PT: &str = "Voc\u{ea} receber\u{e1} uma s\u{e9}rie de logs de seguran\u{e7}a da informa\u{e7}\u{e3}o originados de diversas fontes, como firewalls, sistemas de monitoramento de banco de dados, logs de servidores web e ferramentas de detec\u{e7}\u{e3}o de intrus\u{e3}o. \
Sua tarefa \u{e9} analisar esses logs em ordem cronol\u{f3}gica para identificar e descrever as atividades de um poss\u{ed}vel atacante por meio de um relat\u{f3}rio em LaTeX. Concentre-se em:\n\n\
- Descrever as a\u{e7}\u{f5}es do ataque, como no exemplo:\n\"[timestamp] O atacante acessou o sistema, abriu um arquivo, enviou um webshell, autenticou-se em um servi\u{e7}o, ...\"\n\
- Determinar a sequ\u{ea}ncia cronol\u{f3}gica dos eventos registrados nos logs.\n\
- Identificar padr\u{f5}es an\u{f4}malos ou atividades suspeitas em cada conjunto de logs.\n\
- Explicar a relev\u{e2}ncia de cada atividade suspeita no contexto do cen\u{e1}rio geral do ataque.\n\
- Sugerir quais t\u{e9}cnicas e t\u{e1}ticas o atacante pode estar usando com base nos padr\u{f5}es observados.\n\
- Avaliar potenciais vulnerabilidades ou falhas de seguran\u{e7}a que o atacante explorou.\n\
- Propor medidas de resposta ou mitiga\u{e7}\u{e3}o para os incidentes identificados.\n\n\
- Escape os sublinhados no c\u{f3}digo LaTeX.\n\
- N\u{e3}o diga nada al\u{e9}m do c\u{f3}digo LaTeX do relat\u{f3}rio.\n\
- N\u{e3}o \u{e9} necess\u{e1}rio gerar um pre\u{e2}mbulo, apenas comece a partir de \\begin{document}.\n\
- Indique o n\u{fa}mero de etapas do ataque no seguinte formato: [n_steps:X], onde X \u{e9} o n\u{fa}mero de etapas. Por exemplo, se o ataque envolveu varredura de portas, inje\u{e7}\u{e3}o de SQL e escalonamento de privil\u{e9}gios, ent\u{e3}o X = 3, resultando em [n_steps:3]. Depois de indicar o n\u{fa}mero de etapas, escreva um array com os nomes das etapas para justificar sua resposta. Por exemplo, [n_steps:3] [port_scan, sql_injection, privilege_escalation]";

/// Analyst briefing for the segmentation call, including the marker contract.
pub fn segmentation_instructions(locale: Locale) -> &'static str {
    match locale {
        Locale::English => SEGMENTATION_EN,
        Locale::Portuguese => SEGMENTATION_PT,
    }
}

/// User message asking the model to expand one declared step.
pub fn expansion_request(locale: Locale, step: u32) -> String {
    match locale {
        Locale::English => format!(
            "Please expand the description of Step {step}. Include details about the actions taken, vulnerabilities exploited, and mitigation suggestions."
        ),
        Locale::Portuguese => format!(
            "Por favor, expanda a descri\u{e7}\u{e3}o da Etapa {step}. Inclua detalhes sobre as a\u{e7}\u{f5}es realizadas, as vulnerabilidades exploradas e sugest\u{f5}es de mitiga\u{e7}\u{e3}o."
        ),
    }
}

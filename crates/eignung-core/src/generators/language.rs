//! Curated-bank generators: spelling, grammar, reading comprehension,
//! general knowledge and dictation.

use rand::seq::SliceRandom;
use rand::RngCore;

use super::shuffle_options;
use crate::error::{QuizError, QuizResult};
use crate::model::{Answer, Difficulty, Payload, QuestionBody, QuestionKind};
use crate::traits::{bank_items, bank_tiers, Bank, BankItem, Generator};

// ---------------------------------------------------------------------------
// Banks
// ---------------------------------------------------------------------------

const SPELLING: Bank = &[
    (
        Difficulty::Easy,
        &[
            BankItem {
                prompt: "Welche Schreibweise ist richtig?",
                context: None,
                options: &["Standesamt", "Standezamt", "Standessamt", "Stantesamt"],
                correct: 0,
                explanation: "Standesamt: Stand + Fugen-s + Amt.",
            },
            BankItem {
                prompt: "Welches Wort ist richtig geschrieben?",
                context: None,
                options: &[
                    "Gerichtsverhandlung",
                    "Gerichtsverhanlung",
                    "Gerichtverhandlung",
                    "Gerichtsferhandlung",
                ],
                correct: 0,
                explanation: "Gericht + Fugen-s + Verhandlung.",
            },
            BankItem {
                prompt: "Ergänzen Sie: Ich hoffe, ___ du pünktlich kommst.",
                context: None,
                options: &["dass", "das", "daß", "des"],
                correct: 0,
                explanation: "Die Konjunktion »dass« leitet einen Nebensatz ein, »daß« ist die alte Schreibweise.",
            },
        ],
    ),
    (
        Difficulty::Medium,
        &[
            BankItem {
                prompt: "Welche Schreibweise ist richtig?",
                context: None,
                options: &["Rhythmus", "Rythmus", "Rhytmus", "Rythmuss"],
                correct: 0,
                explanation: "Rhythmus schreibt man mit zwei h: Rh-y-th.",
            },
            BankItem {
                prompt: "Welche Schreibweise ist richtig?",
                context: None,
                options: &["Widerspruch", "Wiederspruch", "Wiederpruch", "Widerspruh"],
                correct: 0,
                explanation: "»wider« bedeutet »gegen«, »wieder« bedeutet »erneut«.",
            },
            BankItem {
                prompt: "Welcher Satz ist richtig geschrieben?",
                context: None,
                options: &[
                    "Das Gericht tagt am Montagabend.",
                    "Das Gericht tagt am montagabend.",
                    "Das Gericht tagt am Montag Abend.",
                    "Das gericht tagt am Montagabend.",
                ],
                correct: 0,
                explanation: "Wochentag und Tageszeit werden als Substantiv zusammen- und großgeschrieben.",
            },
        ],
    ),
    (
        Difficulty::Hard,
        &[
            BankItem {
                prompt: "Welche Schreibweise ist richtig?",
                context: None,
                options: &[
                    "Vollstreckungsbescheid",
                    "Volstreckungsbescheid",
                    "Vollstreckungsbeschied",
                    "Vollstrekungsbescheid",
                ],
                correct: 0,
                explanation: "voll + strecken, Bescheid mit »ei«.",
            },
            BankItem {
                prompt: "Welche Schreibweise ist richtig?",
                context: None,
                options: &["im Allgemeinen", "im allgemeinen", "Im allgemeinen", "im allgemeinem"],
                correct: 0,
                explanation: "Substantivierte Adjektive nach Artikel werden großgeschrieben.",
            },
            BankItem {
                prompt: "Welche Schreibweise ist richtig?",
                context: None,
                options: &["Akquise", "Aquise", "Akquiese", "Aqkuise"],
                correct: 0,
                explanation: "Akquise kommt von »akquirieren« und wird mit »kqu« geschrieben.",
            },
        ],
    ),
    (
        Difficulty::Expert,
        &[
            BankItem {
                prompt: "Welche Schreibweise ist richtig?",
                context: None,
                options: &["Chrysantheme", "Crysantheme", "Chrysanteme", "Chrisantheme"],
                correct: 0,
                explanation: "Aus dem Griechischen: »chrysos« (Gold) und »anthemon« (Blume).",
            },
            BankItem {
                prompt: "Welcher Satz ist richtig geschrieben?",
                context: None,
                options: &[
                    "Sie ist des Lesens und Schreibens kundig.",
                    "Sie ist des lesens und schreibens kundig.",
                    "Sie ist des Lesen und Schreiben kundig.",
                    "Sie ist dem Lesen und Schreiben kundig.",
                ],
                correct: 0,
                explanation: "»kundig« verlangt den Genitiv, substantivierte Verben werden großgeschrieben.",
            },
            BankItem {
                prompt: "Welche Schreibweise ist richtig?",
                context: None,
                options: &["Reminiszenz", "Reminiszens", "Reminizenz", "Remineszenz"],
                correct: 0,
                explanation: "Reminiszenz: lateinisch »reminiscentia«.",
            },
        ],
    ),
];

const GRAMMAR: Bank = &[
    (
        Difficulty::Easy,
        &[
            BankItem {
                prompt: "Wählen Sie die richtige Form: Wegen ___ Regens fiel die Sitzung aus.",
                context: None,
                options: &["des", "dem", "den", "der"],
                correct: 0,
                explanation: "»wegen« verlangt in der Standardsprache den Genitiv.",
            },
            BankItem {
                prompt: "Welcher Satz ist grammatisch richtig?",
                context: None,
                options: &[
                    "Der Richter gab dem Zeugen das Wort.",
                    "Der Richter gab den Zeugen das Wort.",
                    "Der Richter gab der Zeuge das Wort.",
                    "Der Richter gab des Zeugen das Wort.",
                ],
                correct: 0,
                explanation: "Das indirekte Objekt steht im Dativ: dem Zeugen.",
            },
            BankItem {
                prompt: "Ergänzen Sie: Die Akten ___ im Archiv.",
                context: None,
                options: &["liegen", "liegt", "lieg", "liegst"],
                correct: 0,
                explanation: "Ein Subjekt im Plural verlangt das Verb im Plural.",
            },
        ],
    ),
    (
        Difficulty::Medium,
        &[
            BankItem {
                prompt: "Welche Form ist richtig? Er tut so, als ___ er nichts gewusst.",
                context: None,
                options: &["hätte", "hat", "habe gehabt", "hatte"],
                correct: 0,
                explanation: "Nach »als« im irrealen Vergleich steht der Konjunktiv II.",
            },
            BankItem {
                prompt: "Wählen Sie: Trotz ___ Einspruchs wurde das Urteil verkündet.",
                context: None,
                options: &["des", "dem", "den", "die"],
                correct: 0,
                explanation: "»trotz« steht standardsprachlich mit dem Genitiv.",
            },
            BankItem {
                prompt: "Welcher Satz steht im Passiv?",
                context: None,
                options: &[
                    "Der Antrag wurde abgelehnt.",
                    "Der Richter lehnte den Antrag ab.",
                    "Der Antrag ist unzulässig.",
                    "Man lehnt den Antrag ab.",
                ],
                correct: 0,
                explanation: "Vorgangspassiv: »werden« + Partizip II.",
            },
        ],
    ),
    (
        Difficulty::Hard,
        &[
            BankItem {
                prompt: "Indirekte Rede: Der Zeuge sagte: »Ich war zu Hause.«",
                context: None,
                options: &[
                    "Der Zeuge sagte, er sei zu Hause gewesen.",
                    "Der Zeuge sagte, er war zu Hause.",
                    "Der Zeuge sagte, ich sei zu Hause gewesen.",
                    "Der Zeuge sagte, er wäre zu Hause.",
                ],
                correct: 0,
                explanation: "Indirekte Rede steht im Konjunktiv I, die Vergangenheit wird mit »sei … gewesen« gebildet.",
            },
            BankItem {
                prompt: "Welcher Satz ist richtig?",
                context: None,
                options: &[
                    "Die Anzahl der Verfahren ist gestiegen.",
                    "Die Anzahl der Verfahren sind gestiegen.",
                    "Die Anzahl von den Verfahren sind gestiegen.",
                    "Die Anzahl der Verfahren seien gestiegen.",
                ],
                correct: 0,
                explanation: "Das Subjekt ist »die Anzahl« und steht im Singular.",
            },
            BankItem {
                prompt: "Welche Kommasetzung ist richtig?",
                context: None,
                options: &[
                    "Der Beklagte, der nicht erschienen war, wurde verurteilt.",
                    "Der Beklagte der nicht erschienen war, wurde verurteilt.",
                    "Der Beklagte, der nicht erschienen war wurde verurteilt.",
                    "Der Beklagte der, nicht erschienen war, wurde verurteilt.",
                ],
                correct: 0,
                explanation: "Eingeschobene Relativsätze werden auf beiden Seiten durch Kommas abgetrennt.",
            },
        ],
    ),
    (
        Difficulty::Expert,
        &[
            BankItem {
                prompt: "Welcher Satz enthält einen Fehler?",
                context: None,
                options: &[
                    "Er hat sich über die Entscheidung gefreut.",
                    "Sie erinnerte sich an den Termin.",
                    "Wir gedenken dem Opfer.",
                    "Man beschuldigte ihn des Diebstahls.",
                ],
                correct: 2,
                explanation: "»gedenken« verlangt den Genitiv: Wir gedenken des Opfers.",
            },
            BankItem {
                prompt: "Bestimmen Sie den Modus: »Er wäre gekommen, hätte man ihn geladen.«",
                context: None,
                options: &["Konjunktiv II", "Konjunktiv I", "Indikativ", "Imperativ"],
                correct: 0,
                explanation: "»wäre« und »hätte« sind Formen des Konjunktiv II (Irrealis).",
            },
        ],
    ),
];

const COMPREHENSION: Bank = &[
    (
        Difficulty::Easy,
        &[
            BankItem {
                prompt: "Welches Gericht ist laut Text für einen Streit über 3.000 Euro zuständig?",
                context: Some(
                    "Das Amtsgericht ist in Zivilsachen für Streitigkeiten bis zu einem Streitwert von 5.000 Euro zuständig. Bei höheren Streitwerten ist das Landgericht zuständig.",
                ),
                options: &[
                    "Das Amtsgericht",
                    "Das Landgericht",
                    "Das Oberlandesgericht",
                    "Der Text sagt dazu nichts",
                ],
                correct: 0,
                explanation: "3.000 Euro liegen unter der im Text genannten Grenze von 5.000 Euro.",
            },
            BankItem {
                prompt: "Wann kann man laut Text am Donnerstagnachmittag vorsprechen?",
                context: Some(
                    "Die Geschäftsstelle ist montags bis freitags von 8 bis 12 Uhr geöffnet. Donnerstags ist sie zusätzlich von 14 bis 16 Uhr erreichbar.",
                ),
                options: &["Von 14 bis 16 Uhr", "Gar nicht", "Von 12 bis 14 Uhr", "Den ganzen Nachmittag"],
                correct: 0,
                explanation: "Der zweite Satz nennt die zusätzliche Sprechzeit am Donnerstag.",
            },
        ],
    ),
    (
        Difficulty::Medium,
        &[
            BankItem {
                prompt: "Welche Aussage ist laut Text richtig?",
                context: Some(
                    "Gegen den Bescheid kann innerhalb eines Monats nach Zustellung Widerspruch eingelegt werden. Der Widerspruch ist schriftlich oder zur Niederschrift bei der Behörde einzulegen, die den Bescheid erlassen hat.",
                ),
                options: &[
                    "Der Widerspruch kann auch mündlich zur Niederschrift erklärt werden.",
                    "Der Widerspruch muss beim Gericht eingelegt werden.",
                    "Die Frist beginnt mit dem Erlass des Bescheids.",
                    "Der Widerspruch ist nur per E-Mail möglich.",
                ],
                correct: 0,
                explanation: "»Zur Niederschrift« heißt, dass die Behörde eine mündliche Erklärung protokolliert.",
            },
            BankItem {
                prompt: "Was folgt aus dem Text?",
                context: Some(
                    "Schöffen sind ehrenamtliche Richter. Sie wirken an der Hauptverhandlung mit und haben dabei das gleiche Stimmrecht wie die Berufsrichter. An Entscheidungen außerhalb der Hauptverhandlung wirken sie nicht mit.",
                ),
                options: &[
                    "Schöffen stimmen in der Hauptverhandlung gleichberechtigt ab.",
                    "Schöffen werden für ihre Tätigkeit fest angestellt.",
                    "Schöffen entscheiden auch über Haftbefehle außerhalb der Verhandlung.",
                    "Berufsrichter haben in der Hauptverhandlung mehr Stimmen.",
                ],
                correct: 0,
                explanation: "Der Text nennt ausdrücklich das gleiche Stimmrecht in der Hauptverhandlung.",
            },
        ],
    ),
    (
        Difficulty::Hard,
        &[BankItem {
            prompt: "Welche Haltung vertreten die Kritiker laut Text?",
            context: Some(
                "Die elektronische Akte soll Arbeitsabläufe beschleunigen. Kritiker weisen jedoch darauf hin, dass die Umstellung zunächst mehr Aufwand verursacht, weil Papierbestände digitalisiert und Mitarbeitende geschult werden müssen. Langfristig erwarten auch sie Einsparungen.",
            ),
            options: &[
                "Sie erwarten anfangs Mehraufwand, langfristig aber Einsparungen.",
                "Sie lehnen die elektronische Akte grundsätzlich ab.",
                "Sie bestreiten jede Beschleunigung.",
                "Sie halten Schulungen für überflüssig.",
            ],
            correct: 0,
            explanation: "Der letzte Satz (»auch sie«) zeigt, dass die Kritiker langfristig Einsparungen erwarten.",
        }],
    ),
    (
        Difficulty::Expert,
        &[BankItem {
            prompt: "Welche Schlussfolgerung ist mit dem Text vereinbar?",
            context: Some(
                "Der Grundsatz der Mündlichkeit besagt, dass nur der in der mündlichen Verhandlung vorgetragene Prozessstoff der Entscheidung zugrunde gelegt werden darf. Schriftsätze bereiten die Verhandlung lediglich vor; ihr Inhalt wird erst durch Bezugnahme in der Verhandlung zum Gegenstand des Verfahrens.",
            ),
            options: &[
                "Ein nicht in Bezug genommener Schriftsatz darf dem Urteil nicht zugrunde gelegt werden.",
                "Schriftsätze ersetzen die mündliche Verhandlung.",
                "Das Gericht entscheidet ausschließlich nach Aktenlage.",
                "Mündliche Vorträge sind nur bei Zeugen zulässig.",
            ],
            correct: 0,
            explanation: "Nur was in der Verhandlung vorgetragen oder in Bezug genommen wurde, darf die Entscheidung tragen.",
        }],
    ),
];

const GENERAL_KNOWLEDGE: Bank = &[
    (
        Difficulty::Easy,
        &[
            BankItem {
                prompt: "Wie viele Bundesländer hat Deutschland?",
                context: None,
                options: &["16", "14", "12", "18"],
                correct: 0,
                explanation: "Die Bundesrepublik besteht aus 16 Ländern.",
            },
            BankItem {
                prompt: "Wer wählt den Bundeskanzler?",
                context: None,
                options: &["Der Bundestag", "Der Bundesrat", "Das Volk direkt", "Der Bundespräsident"],
                correct: 0,
                explanation: "Art. 63 GG: Der Bundestag wählt auf Vorschlag des Bundespräsidenten.",
            },
            BankItem {
                prompt: "In welcher Stadt hat das Bundesverfassungsgericht seinen Sitz?",
                context: None,
                options: &["Karlsruhe", "Berlin", "Leipzig", "Bonn"],
                correct: 0,
                explanation: "Das Bundesverfassungsgericht sitzt in Karlsruhe.",
            },
        ],
    ),
    (
        Difficulty::Medium,
        &[
            BankItem {
                prompt: "Welches Gericht ist Revisionsinstanz in Zivil- und Strafsachen?",
                context: None,
                options: &[
                    "Bundesgerichtshof",
                    "Bundesverfassungsgericht",
                    "Oberlandesgericht",
                    "Bundesverwaltungsgericht",
                ],
                correct: 0,
                explanation: "Der BGH ist oberstes Gericht der ordentlichen Gerichtsbarkeit.",
            },
            BankItem {
                prompt: "Welcher Artikel des Grundgesetzes schützt die Menschenwürde?",
                context: None,
                options: &["Art. 1", "Art. 3", "Art. 20", "Art. 5"],
                correct: 0,
                explanation: "Art. 1 Abs. 1 GG: Die Würde des Menschen ist unantastbar.",
            },
            BankItem {
                prompt: "Wie lange dauert eine Wahlperiode des Bundestages?",
                context: None,
                options: &["4 Jahre", "5 Jahre", "6 Jahre", "3 Jahre"],
                correct: 0,
                explanation: "Art. 39 GG: Der Bundestag wird auf vier Jahre gewählt.",
            },
        ],
    ),
    (
        Difficulty::Hard,
        &[
            BankItem {
                prompt: "Welche Grundsätze legt Art. 20 GG fest?",
                context: None,
                options: &[
                    "Demokratie, Rechtsstaat, Sozialstaat und Bundesstaat",
                    "Religions- und Gewissensfreiheit",
                    "Brief- und Postgeheimnis",
                    "Berufsfreiheit",
                ],
                correct: 0,
                explanation: "Art. 20 GG enthält die Staatsstrukturprinzipien.",
            },
            BankItem {
                prompt: "Wer ernennt die Bundesrichter?",
                context: None,
                options: &[
                    "Der Bundespräsident",
                    "Der Bundeskanzler",
                    "Die Bundestagspräsidentin bzw. der Bundestagspräsident",
                    "Der Bundesrat",
                ],
                correct: 0,
                explanation: "Art. 60 GG: Der Bundespräsident ernennt die Bundesrichter.",
            },
            BankItem {
                prompt: "Ab welchem Alter ist man in Deutschland strafmündig?",
                context: None,
                options: &["14 Jahre", "12 Jahre", "16 Jahre", "18 Jahre"],
                correct: 0,
                explanation: "§ 19 StGB: Wer bei der Tat noch nicht 14 ist, ist schuldunfähig.",
            },
        ],
    ),
    (
        Difficulty::Expert,
        &[
            BankItem {
                prompt: "Wie viele Richter gehören einem Senat des Bundesverfassungsgerichts an?",
                context: None,
                options: &["8", "16", "5", "12"],
                correct: 0,
                explanation: "Das Gericht hat zwei Senate mit je acht Richtern.",
            },
            BankItem {
                prompt: "Welches Gesetz regelt den Aufbau der ordentlichen Gerichtsbarkeit?",
                context: None,
                options: &[
                    "Gerichtsverfassungsgesetz (GVG)",
                    "Zivilprozessordnung (ZPO)",
                    "Strafgesetzbuch (StGB)",
                    "Bürgerliches Gesetzbuch (BGB)",
                ],
                correct: 0,
                explanation: "Das GVG regelt Aufbau und Zuständigkeit der ordentlichen Gerichte.",
            },
        ],
    ),
];

// ---------------------------------------------------------------------------
// Bank generator
// ---------------------------------------------------------------------------

/// Multiple-choice generator over a curated [`Bank`].
pub struct BankGenerator {
    kind: QuestionKind,
    bank: Bank,
    tiers: Vec<Difficulty>,
    /// First item of the easiest stocked tier.
    fallback: BankItem,
}

impl BankGenerator {
    /// Fails with [`QuizError::EmptyBank`] when no tier holds an item.
    pub fn new(kind: QuestionKind, bank: Bank) -> QuizResult<Self> {
        let tiers = bank_tiers(bank);
        let fallback = tiers
            .first()
            .and_then(|tier| bank_items(bank, *tier).first().copied())
            .ok_or_else(|| QuizError::EmptyBank(kind.to_string()))?;
        Ok(Self {
            kind,
            bank,
            tiers,
            fallback,
        })
    }

    pub fn spelling() -> QuizResult<Self> {
        Self::new(QuestionKind::Spelling, SPELLING)
    }

    pub fn grammar() -> QuizResult<Self> {
        Self::new(QuestionKind::Grammar, GRAMMAR)
    }

    pub fn comprehension() -> QuizResult<Self> {
        Self::new(QuestionKind::Comprehension, COMPREHENSION)
    }

    pub fn general_knowledge() -> QuizResult<Self> {
        Self::new(QuestionKind::GeneralKnowledge, GENERAL_KNOWLEDGE)
    }
}

impl Generator for BankGenerator {
    fn kind(&self) -> QuestionKind {
        self.kind
    }

    fn supported(&self) -> &[Difficulty] {
        &self.tiers
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let tier = difficulty.resolve(&self.tiers);
        let item = bank_items(self.bank, tier)
            .choose(rng)
            .copied()
            .unwrap_or(self.fallback);
        let (options, correct) = shuffle_options(item.options, &[item.correct], rng);

        QuestionBody {
            kind: self.kind,
            prompt: item.prompt.to_string(),
            payload: Payload::Choices {
                context: item.context.map(str::to_string),
                options,
            },
            answer: Answer::Choice(correct.first().copied().unwrap_or_default()),
            explanation: item.explanation.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dictation
// ---------------------------------------------------------------------------

fn dictation_texts(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => &[
            "Das Amtsgericht hat heute drei Verhandlungen angesetzt.",
            "Bitte reichen Sie die Unterlagen bis Freitag bei der Geschäftsstelle ein.",
        ],
        Difficulty::Medium => &[
            "Der Kläger beantragte, die Frist zur Stellungnahme um zwei Wochen zu verlängern.",
            "Nach Eingang der Klageschrift wird diese dem Beklagten förmlich zugestellt.",
        ],
        Difficulty::Hard | Difficulty::Expert => &[
            "Das Gericht wies darauf hin, dass der Widerspruch nicht fristgemäß eingegangen und daher unzulässig sei.",
            "Im Allgemeinen gilt, dass die Kosten des Rechtsstreits die unterliegende Partei zu tragen hat.",
        ],
    }
}

/// Open-ended dictation items; any non-empty transcript is accepted.
pub struct DictationGenerator;

impl Generator for DictationGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::Dictation
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let text = dictation_texts(difficulty)
            .choose(rng)
            .copied()
            .unwrap_or_default();

        QuestionBody {
            kind: QuestionKind::Dictation,
            prompt: "Schreiben Sie den folgenden Text fehlerfrei ab:".to_string(),
            payload: Payload::Dictation {
                text: text.to_string(),
            },
            answer: Answer::Open,
            explanation: format!("Vergleichen Sie Ihre Abschrift selbst mit der Vorlage: {text}"),
        }
    }
}

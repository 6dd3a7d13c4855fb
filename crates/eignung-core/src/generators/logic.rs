//! Logic generators: syllogisms and analogies from curated banks.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::RngCore;

use super::shuffle_options;
use crate::model::{Answer, Difficulty, Payload, QuestionBody, QuestionKind};
use crate::traits::Generator;

/// A premise set with candidate conclusions.
#[derive(Debug, Clone, Copy)]
struct Syllogism {
    premises: &'static [&'static str],
    options: &'static [&'static str],
    /// Indices of every conclusion that follows from the premises.
    valid: &'static [usize],
    explanation: &'static str,
}

const SINGLE_TIERS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

fn single_bank(difficulty: Difficulty) -> &'static [Syllogism] {
    match difficulty {
        Difficulty::Easy => &[
            Syllogism {
                premises: &[
                    "Alle Beamten haben eine Ausbildung.",
                    "Herr Schmidt ist Beamter.",
                ],
                options: &[
                    "Herr Schmidt hat eine Ausbildung.",
                    "Herr Schmidt hat keine Ausbildung.",
                    "Alle mit Ausbildung sind Beamte.",
                    "Keine Aussage möglich.",
                ],
                valid: &[0],
                explanation: "Wenn alle Beamten eine Ausbildung haben und Herr Schmidt Beamter ist, hat er eine Ausbildung.",
            },
            Syllogism {
                premises: &[
                    "Alle Richter sind Volljuristen.",
                    "Frau Weber ist Richterin.",
                ],
                options: &[
                    "Alle Volljuristen sind Richter.",
                    "Frau Weber ist Volljuristin.",
                    "Frau Weber ist keine Volljuristin.",
                    "Keine Aussage möglich.",
                ],
                valid: &[1],
                explanation: "Frau Weber gehört zur Menge der Richter, die vollständig in der Menge der Volljuristen liegt.",
            },
            Syllogism {
                premises: &[
                    "Kein Zeuge darf vor Gericht die Unwahrheit sagen.",
                    "Herr Klein ist Zeuge.",
                ],
                options: &[
                    "Herr Klein darf die Unwahrheit sagen.",
                    "Herr Klein ist Angeklagter.",
                    "Herr Klein darf vor Gericht nicht die Unwahrheit sagen.",
                    "Keine Aussage möglich.",
                ],
                valid: &[2],
                explanation: "Das Verbot gilt für jeden Zeugen und damit auch für Herrn Klein.",
            },
        ],
        Difficulty::Medium => &[
            Syllogism {
                premises: &[
                    "Alle Akten im Archiv sind abgeschlossen.",
                    "Einige Akten im Archiv sind älter als zehn Jahre.",
                ],
                options: &[
                    "Einige abgeschlossene Akten sind älter als zehn Jahre.",
                    "Alle abgeschlossenen Akten liegen im Archiv.",
                    "Keine Akte, die älter als zehn Jahre ist, ist abgeschlossen.",
                    "Alle Akten, die älter als zehn Jahre sind, liegen im Archiv.",
                ],
                valid: &[0],
                explanation: "Die alten Akten im Archiv sind wie alle Archivakten abgeschlossen, also gibt es abgeschlossene Akten, die älter als zehn Jahre sind.",
            },
            Syllogism {
                premises: &[
                    "Kein Schöffe ist Berufsrichter.",
                    "Alle Vorsitzenden sind Berufsrichter.",
                ],
                options: &[
                    "Einige Vorsitzende sind Schöffen.",
                    "Kein Vorsitzender ist Schöffe.",
                    "Alle Berufsrichter sind Vorsitzende.",
                    "Keine Aussage möglich.",
                ],
                valid: &[1],
                explanation: "Vorsitzende liegen vollständig in der Menge der Berufsrichter, die mit der Menge der Schöffen keine Überschneidung hat.",
            },
            Syllogism {
                premises: &[
                    "Einige Verfahren sind öffentlich.",
                    "Kein Jugendstrafverfahren ist öffentlich.",
                ],
                options: &[
                    "Kein Verfahren ist ein Jugendstrafverfahren.",
                    "Alle öffentlichen Verfahren sind Jugendstrafverfahren.",
                    "Einige Verfahren sind keine Jugendstrafverfahren.",
                    "Alle Verfahren sind öffentlich.",
                ],
                valid: &[2],
                explanation: "Die öffentlichen Verfahren können keine Jugendstrafverfahren sein, also sind einige Verfahren keine Jugendstrafverfahren.",
            },
        ],
        Difficulty::Hard => &[
            Syllogism {
                premises: &[
                    "Wenn eine Frist versäumt wird, ist der Antrag unzulässig.",
                    "Der Antrag ist zulässig oder wird abgewiesen.",
                    "Der Antrag wurde nicht abgewiesen.",
                ],
                options: &[
                    "Die Frist wurde nicht versäumt.",
                    "Die Frist wurde versäumt.",
                    "Der Antrag ist unzulässig.",
                    "Keine eindeutige Aussage möglich.",
                ],
                valid: &[0],
                explanation: "Der Antrag ist zulässig, da er nicht abgewiesen wurde. Wäre die Frist versäumt, wäre er unzulässig, also wurde sie nicht versäumt.",
            },
            Syllogism {
                premises: &[
                    "Wenn der Beschuldigte ein Alibi hat, wird das Verfahren eingestellt.",
                    "Das Verfahren wurde nicht eingestellt.",
                ],
                options: &[
                    "Der Beschuldigte hat ein Alibi.",
                    "Der Beschuldigte ist schuldig.",
                    "Der Beschuldigte hat kein Alibi.",
                    "Keine Aussage möglich.",
                ],
                valid: &[2],
                explanation: "Umkehrschluss (modus tollens): Tritt die Folge nicht ein, kann die Bedingung nicht erfüllt sein. Über die Schuld sagt das nichts.",
            },
            Syllogism {
                premises: &[
                    "Wenn es regnet, ist die Straße nass.",
                    "Die Straße ist nass.",
                ],
                options: &[
                    "Es regnet.",
                    "Es regnet nicht.",
                    "Die Straße ist trocken.",
                    "Ob es regnet, lässt sich nicht sicher sagen.",
                ],
                valid: &[3],
                explanation: "Aus der Folge darf nicht auf die Bedingung geschlossen werden, die Straße kann auch aus anderen Gründen nass sein.",
            },
        ],
        // Not stocked; Expert resolves to Hard.
        Difficulty::Expert => &[],
    }
}

fn multi_bank(difficulty: Difficulty) -> &'static [Syllogism] {
    match difficulty {
        Difficulty::Easy => &[Syllogism {
            premises: &[
                "Alle Gerichte haben eine Geschäftsstelle.",
                "Das Amtsgericht Köln ist ein Gericht.",
            ],
            options: &[
                "Das Amtsgericht Köln hat eine Geschäftsstelle.",
                "Alles mit Geschäftsstelle ist ein Gericht.",
                "Es gibt mindestens ein Gericht mit Geschäftsstelle.",
                "Das Amtsgericht Köln hat keine Geschäftsstelle.",
            ],
            valid: &[0, 2],
            explanation: "Das Amtsgericht Köln hat als Gericht eine Geschäftsstelle, damit existiert auch ein Gericht mit Geschäftsstelle. Die Umkehrung gilt nicht.",
        }],
        Difficulty::Medium => &[Syllogism {
            premises: &[
                "Alle Rechtspfleger sind Beamte.",
                "Alle Beamten sind zur Verschwiegenheit verpflichtet.",
            ],
            options: &[
                "Alle Rechtspfleger sind zur Verschwiegenheit verpflichtet.",
                "Alle Beamten sind Rechtspfleger.",
                "Einige zur Verschwiegenheit Verpflichtete sind keine Beamten.",
                "Einige zur Verschwiegenheit Verpflichtete sind Rechtspfleger.",
            ],
            valid: &[0, 3],
            explanation: "Rechtspfleger ⊂ Beamte ⊂ Verschwiegenheitspflichtige. Daraus folgen A und D, nicht aber die Umkehrungen.",
        }],
        Difficulty::Hard => &[Syllogism {
            premises: &[
                "Wenn ein Urteil rechtskräftig ist, kann keine Berufung mehr eingelegt werden.",
                "Das Urteil ist rechtskräftig.",
                "Kein Urteil, gegen das keine Berufung möglich ist, wird vom Landgericht überprüft.",
            ],
            options: &[
                "Gegen das Urteil kann keine Berufung eingelegt werden.",
                "Das Urteil wird nicht vom Landgericht überprüft.",
                "Das Urteil wird vom Landgericht überprüft.",
                "Das Urteil ist nicht rechtskräftig.",
            ],
            valid: &[0, 1],
            explanation: "Aus der Rechtskraft folgt, dass keine Berufung möglich ist, und daraus wiederum, dass das Landgericht nicht überprüft.",
        }],
        Difficulty::Expert => &[Syllogism {
            premises: &[
                "Einige Zeugen sind Polizisten.",
                "Alle Polizisten sind vereidigt.",
                "Kein Vereidigter darf die Aussage verweigern.",
            ],
            options: &[
                "Einige Zeugen sind vereidigt.",
                "Einige Zeugen dürfen die Aussage nicht verweigern.",
                "Alle Zeugen sind vereidigt.",
                "Kein Polizist darf die Aussage verweigern.",
            ],
            valid: &[0, 1, 3],
            explanation: "Die Zeugen, die Polizisten sind, sind vereidigt und dürfen daher nicht verweigern. Für alle Zeugen folgt das nicht.",
        }],
    }
}

fn premises_question(
    kind: QuestionKind,
    prompt: &str,
    item: &Syllogism,
    rng: &mut dyn RngCore,
) -> (QuestionBody, Vec<usize>) {
    let (options, valid) = shuffle_options(item.options, item.valid, rng);
    let body = QuestionBody {
        kind,
        prompt: prompt.to_string(),
        payload: Payload::Premises {
            premises: item.premises.iter().map(|p| p.to_string()).collect(),
            options,
        },
        answer: Answer::Open,
        explanation: item.explanation.to_string(),
    };
    (body, valid)
}

/// Syllogisms with exactly one valid conclusion.
pub struct SyllogismGenerator;

impl Generator for SyllogismGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::Syllogism
    }

    fn supported(&self) -> &[Difficulty] {
        &SINGLE_TIERS
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let bank = single_bank(difficulty.resolve(&SINGLE_TIERS));
        let item = bank
            .choose(rng)
            .copied()
            .unwrap_or_else(|| single_bank(Difficulty::Easy)[0]);
        let (mut body, valid) = premises_question(
            QuestionKind::Syllogism,
            "Welche Schlussfolgerung ist korrekt?",
            &item,
            rng,
        );
        body.answer = Answer::Choice(valid.first().copied().unwrap_or_default());
        body
    }
}

/// Syllogisms where every valid conclusion must be selected.
pub struct MultiSyllogismGenerator;

impl Generator for MultiSyllogismGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::SyllogismMulti
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let bank = multi_bank(difficulty);
        let item = bank.choose(rng).copied().unwrap_or(bank[0]);
        let (mut body, valid) = premises_question(
            QuestionKind::SyllogismMulti,
            "Welche Schlussfolgerungen sind korrekt? (Mehrfachauswahl)",
            &item,
            rng,
        );
        body.answer = Answer::Choices(valid.into_iter().collect::<BTreeSet<_>>());
        body
    }
}

/// An analogy `pair[0] : pair[1] = target : ?`.
#[derive(Debug, Clone, Copy)]
struct Analogy {
    pair: [&'static str; 2],
    target: &'static str,
    options: &'static [&'static str],
    correct: usize,
    explanation: &'static str,
}

fn analogy_bank(difficulty: Difficulty) -> &'static [Analogy] {
    match difficulty {
        Difficulty::Easy => &[
            Analogy {
                pair: ["Richter", "Urteil"],
                target: "Staatsanwalt",
                options: &["Anklage", "Verteidigung", "Zeuge", "Beweis"],
                correct: 0,
                explanation: "Der Richter fällt das Urteil, der Staatsanwalt erhebt die Anklage.",
            },
            Analogy {
                pair: ["Buch", "Seite"],
                target: "Gesetz",
                options: &["Paragraph", "Verlag", "Richter", "Bibliothek"],
                correct: 0,
                explanation: "Ein Buch besteht aus Seiten, ein Gesetz aus Paragraphen.",
            },
            Analogy {
                pair: ["Arzt", "Patient"],
                target: "Anwalt",
                options: &["Kanzlei", "Mandant", "Richter", "Akte"],
                correct: 1,
                explanation: "Der Arzt behandelt Patienten, der Anwalt vertritt Mandanten.",
            },
        ],
        Difficulty::Medium => &[
            Analogy {
                pair: ["Revision", "BGH"],
                target: "Berufung",
                options: &["OLG", "AG", "BVerfG", "EuGH"],
                correct: 0,
                explanation: "Die Revision geht zum BGH, die Berufung gegen Urteile des Landgerichts zum OLG.",
            },
            Analogy {
                pair: ["Kläger", "Beklagter"],
                target: "Staatsanwaltschaft",
                options: &["Verteidiger", "Angeklagter", "Schöffe", "Nebenkläger"],
                correct: 1,
                explanation: "Im Zivilprozess steht der Kläger dem Beklagten gegenüber, im Strafprozess die Staatsanwaltschaft dem Angeklagten.",
            },
            Analogy {
                pair: ["Legislative", "Parlament"],
                target: "Judikative",
                options: &["Regierung", "Polizei", "Gerichte", "Verwaltung"],
                correct: 2,
                explanation: "Die gesetzgebende Gewalt liegt beim Parlament, die rechtsprechende bei den Gerichten.",
            },
        ],
        Difficulty::Hard => &[
            Analogy {
                pair: ["Verjährung", "Zeit"],
                target: "Verwirkung",
                options: &["Verhalten", "Frist", "Gesetz", "Recht"],
                correct: 0,
                explanation: "Verjährung tritt durch Zeitablauf ein, Verwirkung durch illoyales Verhalten.",
            },
            Analogy {
                pair: ["Vorsatz", "Wissen und Wollen"],
                target: "Fahrlässigkeit",
                options: &["Absicht", "Sorgfaltspflichtverletzung", "Zufall", "Notwehr"],
                correct: 1,
                explanation: "Vorsatz setzt Wissen und Wollen voraus, Fahrlässigkeit eine Verletzung der Sorgfaltspflicht.",
            },
        ],
        Difficulty::Expert => &[
            Analogy {
                pair: ["Bundestag", "Gesetz"],
                target: "Gemeinderat",
                options: &["Verordnung", "Urteil", "Satzung", "Verwaltungsakt"],
                correct: 2,
                explanation: "Der Bundestag beschließt Gesetze, der Gemeinderat Satzungen.",
            },
            Analogy {
                pair: ["Eigentum", "Sache"],
                target: "Urheberrecht",
                options: &["Werk", "Marke", "Besitz", "Patent"],
                correct: 0,
                explanation: "Eigentum besteht an einer Sache, das Urheberrecht an einem Werk.",
            },
        ],
    }
}

/// Analogies with one correct completion.
pub struct AnalogyGenerator;

impl Generator for AnalogyGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::Analogy
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let bank = analogy_bank(difficulty);
        let item = bank.choose(rng).copied().unwrap_or(bank[0]);
        let (options, correct) = shuffle_options(item.options, &[item.correct], rng);

        QuestionBody {
            kind: QuestionKind::Analogy,
            prompt: format!("{} : {} = {} : ?", item.pair[0], item.pair[1], item.target),
            payload: Payload::Analogy {
                pair: [item.pair[0].to_string(), item.pair[1].to_string()],
                target: item.target.to_string(),
                options,
            },
            answer: Answer::Choice(correct.first().copied().unwrap_or_default()),
            explanation: item.explanation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn single_syllogism_answer_points_at_valid_conclusion() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..40 {
            let q = SyllogismGenerator.generate(Difficulty::Hard, &mut rng);
            let Answer::Choice(i) = q.answer else {
                panic!("expected single choice");
            };
            let options = q.payload.options().unwrap();
            let conclusion = options[i].as_str();
            assert!(single_bank(Difficulty::Hard).iter().any(|s| s.options[s.valid[0]] == conclusion));
        }
    }

    #[test]
    fn expert_syllogism_falls_back_to_hard_bank() {
        assert_eq!(
            Difficulty::Expert.resolve(SyllogismGenerator.supported()),
            Difficulty::Hard
        );
        assert!(single_bank(Difficulty::Expert).is_empty());

        // Called directly, the generator still draws from the Hard bank.
        let mut rng = StdRng::seed_from_u64(22);
        for _ in 0..20 {
            let q = SyllogismGenerator.generate_for(Difficulty::Expert, &mut rng);
            let Payload::Premises { premises, .. } = &q.payload else {
                panic!("expected premises payload");
            };
            assert!(single_bank(Difficulty::Hard)
                .iter()
                .any(|s| s.premises[0] == premises[0]));
        }
    }

    #[test]
    fn multi_syllogism_keeps_all_valid_indices() {
        let mut rng = StdRng::seed_from_u64(4);
        for difficulty in Difficulty::ALL {
            let q = MultiSyllogismGenerator.generate(difficulty, &mut rng);
            let Answer::Choices(set) = &q.answer else {
                panic!("expected choice set");
            };
            assert_eq!(set.len(), multi_bank(difficulty)[0].valid.len());
        }
    }

    #[test]
    fn analogy_prompt_is_synthesized() {
        let mut rng = StdRng::seed_from_u64(8);
        let q = AnalogyGenerator.generate(Difficulty::Easy, &mut rng);
        assert!(q.prompt.contains(" = "));
        assert!(q.prompt.ends_with(" : ?"));
        let Answer::Choice(i) = q.answer else {
            panic!("expected single choice");
        };
        assert!(i < q.payload.options().unwrap().len());
    }

    #[test]
    fn banks_have_valid_indices() {
        for difficulty in Difficulty::ALL {
            for s in single_bank(difficulty).iter().chain(multi_bank(difficulty)) {
                assert!(s.valid.iter().all(|&v| v < s.options.len()));
            }
            for a in analogy_bank(difficulty) {
                assert!(a.correct < a.options.len());
            }
        }
    }
}

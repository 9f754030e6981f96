//! Curated fact bank with a deterministic field-derived fallback.
//!
//! Leaders from the seeded dataset have hand-written facts; anyone else gets
//! facts synthesized from their own record. The curated branch shuffles, the
//! fallback branch is deliberately randomness-free so repeat calls agree.

use std::collections::HashMap;
use std::sync::OnceLock;

use chronika_core::types::Leader;
use rand::seq::SliceRandom;

use crate::encoder::truncate_chars;

/// Curated facts keyed by leader id.
fn curated() -> &'static HashMap<i64, Vec<&'static str>> {
    static CURATED: OnceLock<HashMap<i64, Vec<&'static str>>> = OnceLock::new();
    CURATED.get_or_init(|| {
        HashMap::from([
            (1, vec![ // Lenin
                "Ленин был заядлым шахматистом и часто играл с видными революционерами.",
                "Настоящая фамилия Ленина - Ульянов. Псевдоним 'Ленин' он взял от реки Лена.",
                "Ленин владел несколькими иностранными языками, включая немецкий, французский и английский.",
                "После покушения в 1918 году в теле Ленина осталось две пули, которые врачи не решились извлечь.",
                "Ленин был автором более 50 томов сочинений по философии, экономике и политике.",
                "Ленин страдал от мигреней и бессонницы, что усугублялось напряжённой работой.",
                "Мавзолей Ленина был построен вопреки его завещанию быть похороненным рядом с матерью.",
                "Ленин очень любил кошек и часто проводил время в общении с ними.",
            ]),
            (2, vec![ // Stalin
                "Сталин был семинаристом и изучал богословие в Тифлисской духовной семинарии.",
                "Настоящая фамилия Сталина - Джугашвили. 'Сталин' означает 'стальной человек'.",
                "Сталин писал стихи в молодости на грузинском языке, некоторые были опубликованы.",
                "У Сталина была повреждена левая рука из-за детской травмы, что освободило его от службы в царской армии.",
                "Сталин курил трубку и обычно работал по ночам, засыпая под утро.",
                "Рост Сталина составлял всего 165 см, что он компенсировал ношением обуви на высоких каблуках.",
                "Сталин был номинирован на Нобелевскую премию мира дважды - в 1945 и 1948 годах.",
                "Сталин обладал феноменальной памятью и мог цитировать целые страницы прочитанных книг.",
            ]),
            (3, vec![ // Khrushchev
                "Хрущёв был единственным советским лидером, не имевшим высшего образования.",
                "Известен своим поступком на заседании ООН в 1960 году, когда стучал ботинком по столу.",
                "Хрущёв любил кукурузу и пытался внедрить её выращивание по всему СССР.",
                "При Хрущёве началось массовое жилищное строительство, появились знаменитые 'хрущёвки'.",
                "Хрущёв первым из советских лидеров посетил США в 1959 году.",
                "Хрущёв инициировал освоение целинных земель в Казахстане и Сибири.",
                "При Хрущёве был запущен первый искусственный спутник Земли и совершён первый полёт человека в космос.",
                "Хрущёв лично курировал строительство московского метрополитена.",
            ]),
            (4, vec![ // Brezhnev
                "Брежнев был страстным коллекционером автомобилей, в его коллекции было более 50 машин.",
                "Брежнев получил звание Маршала Советского Союза, несмотря на отсутствие крупных военных заслуг.",
                "За время правления Брежнев получил более 200 наград, включая 5 звёзд Героя.",
                "Брежнев любил охоту и часто проводил время на охотничьих заказниках.",
                "Период правления Брежнева часто называют 'золотым веком' за стабильность и предсказуемость.",
                "Брежнев был заядлым курильщиком и выкуривал до трёх пачек сигарет в день.",
                "При Брежневе СССР достиг военного паритета с США и стал настоящей сверхдержавой.",
                "Брежнев страдал от множества заболеваний в последние годы жизни, но продолжал руководить страной.",
            ]),
            (5, vec![ // Andropov
                "Андропов возглавлял КГБ в течение 15 лет перед тем, как стать генсеком.",
                "Андропов свободно говорил на нескольких языках и любил джаз.",
                "При Андропове началась кампания по укреплению трудовой дисциплины, включая рейды в магазинах и кинотеатрах в рабочее время.",
                "Андропов был одним из самых образованных советских лидеров, интересовался литературой и искусством.",
                "Правление Андропова было недолгим - всего 15 месяцев из-за болезни.",
                "Андропов был поклонником западной музыки и собирал коллекцию джазовых пластинок.",
                "Андропов начал подготовку экономических реформ, которые позже продолжил Горбачёв.",
                "Андропов был единственным руководителем СССР, кто лично жил в обычной квартире, а не в особняке.",
            ]),
            (6, vec![ // Chernenko
                "Черненко был самым возрастным лидером, пришедшим к власти в СССР - ему было 72 года.",
                "Черненко страдал от эмфиземы лёгких и часто появлялся на публике с кислородной маской за кулисами.",
                "Правление Черненко продолжалось всего 13 месяцев - самое короткое в истории СССР.",
                "Черненко начинал карьеру как пограничник на советско-китайской границе.",
                "При Черненко были предприняты попытки вернуться к политике Брежнева.",
                "Черненко был личным другом Брежнева и курировал идеологическую работу КПСС.",
                "Во время правления Черненко здоровье лидера было настолько плохим, что он редко появлялся публично.",
                "Черненко был последним советским лидером старой гвардии перед приходом Горбачёва.",
            ]),
            (7, vec![ // Gorbachev
                "Горбачёв был единственным президентом СССР и последним генеральным секретарём КПСС.",
                "Горбачёв получил Нобелевскую премию мира в 1990 году за прекращение холодной войны.",
                "Родимое пятно на лбу Горбачёва стало его узнаваемой чертой по всему миру.",
                "Горбачёв окончил юридический факультет МГУ - редкость для советских лидеров.",
                "После распада СССР Горбачёв снимался в рекламе и занимался общественной деятельностью.",
                "Политика гласности Горбачёва привела к невиданной ранее свободе слова в СССР.",
                "Горбачёв был первым советским лидером, чья жена (Раиса Горбачёва) играла заметную публичную роль.",
                "Горбачёв был единственным советским лидером, кто добровольно ушёл с поста.",
            ]),
        ])
    })
}

/// Facts provider: curated snippets first, synthesized fallback otherwise.
#[derive(Debug, Default)]
pub struct FactBank;

impl FactBank {
    pub fn new() -> Self {
        Self
    }

    /// Up to `count` facts for `leader`.
    ///
    /// Curated facts are returned as a shuffled subset of size
    /// `min(count, available)`; otherwise a deterministic pool is derived
    /// from the record's own fields. Always non-empty for a valid leader.
    /// Pure read — persisting the result is the caller's concern.
    pub fn facts_for(&self, leader: &Leader, count: usize) -> Vec<String> {
        if let Some(facts) = curated().get(&leader.id) {
            let mut facts: Vec<String> = facts.iter().map(|s| (*s).to_string()).collect();
            facts.shuffle(&mut rand::thread_rng());
            facts.truncate(count);
            return facts;
        }

        let mut pool = fallback_pool(leader);
        pool.truncate(count);
        pool
    }
}

/// Facts derived from the leader's own fields. Same leader, same output.
fn fallback_pool(leader: &Leader) -> Vec<String> {
    let mut pool = Vec::new();

    if let (Some(year), Some(place)) = (leader.birth_year, leader.birth_place.as_deref()) {
        pool.push(format!("{} родился в {} году в {}.", leader.name_primary, year, place));
    }
    if !leader.position.is_empty() {
        pool.push(format!("Занимал должность: {}.", leader.position));
    }
    if !leader.achievements.is_empty() {
        pool.push(truncate_chars(&leader.achievements, 200).to_string());
    }
    if let (Some(start), Some(end)) = (leader.years_in_power_start, leader.years_in_power_end) {
        pool.push(format!(
            "{} находился у власти с {} по {} год.",
            leader.name_primary, start, end
        ));
    }
    if let (Some(year), Some(place)) = (leader.death_year, leader.death_place.as_deref()) {
        pool.push(format!("{} умер в {} году в {}.", leader.name_primary, year, place));
    }
    if pool.is_empty() {
        pool.push(format!("{} ({})", leader.name_primary, leader.name_secondary));
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curated_leader() -> Leader {
        Leader { id: 1, name_primary: "Ленин".into(), name_secondary: "Lenin".into(), ..Default::default() }
    }

    fn uncurated_leader() -> Leader {
        Leader {
            id: 99,
            name_primary: "Косыгин".into(),
            name_secondary: "Kosygin".into(),
            birth_year: Some(1904),
            birth_place: Some("Санкт-Петербург".into()),
            position: "Председатель Совета министров СССР".into(),
            achievements: "Экономическая реформа 1965 года.".into(),
            years_in_power_start: Some(1964),
            years_in_power_end: Some(1980),
            ..Default::default()
        }
    }

    #[test]
    fn test_curated_facts_are_sampled_from_fixed_set() {
        let bank = FactBank::new();
        let leader = curated_leader();
        let set = curated().get(&1).unwrap();

        let facts = bank.facts_for(&leader, 3);
        assert_eq!(facts.len(), 3);
        for fact in &facts {
            assert!(set.contains(&fact.as_str()));
        }
        // distinct entries
        for (i, a) in facts.iter().enumerate() {
            for b in facts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }

        // a second draw still only yields curated facts
        for fact in bank.facts_for(&leader, 3) {
            assert!(set.contains(&fact.as_str()));
        }
    }

    #[test]
    fn test_curated_count_capped_at_available() {
        let bank = FactBank::new();
        let facts = bank.facts_for(&curated_leader(), 50);
        assert_eq!(facts.len(), curated().get(&1).unwrap().len());
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let bank = FactBank::new();
        let leader = uncurated_leader();
        let first = bank.facts_for(&leader, 3);
        let second = bank.facts_for(&leader, 3);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(first[0].contains("1904"));
        assert!(first[1].contains("Председатель"));
    }

    #[test]
    fn test_fallback_never_empty() {
        let bank = FactBank::new();
        let bare = Leader { id: 100, name_primary: "Маленков".into(), name_secondary: "Malenkov".into(), ..Default::default() };
        let facts = bank.facts_for(&bare, 3);
        assert!(!facts.is_empty());
        assert!(facts[0].contains("Маленков"));
    }
}

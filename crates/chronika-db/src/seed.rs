//! The initial leader dataset, inserted when the leaders table is empty.

use chronika_core::types::Leader;

pub(crate) fn seed_leaders() -> Vec<Leader> {
    vec![
        Leader {
            id: 1,
            name_primary: "Владимир Ильич Ленин".into(),
            name_secondary: "Vladimir Ilyich Lenin".into(),
            slug: "lenin".into(),
            birth_year: Some(1870),
            birth_place: Some("Симбирск (ныне Ульяновск)".into()),
            death_year: Some(1924),
            death_place: Some("Горки Ленинские, под Москвой".into()),
            position: "Председатель Совета народных комиссаров РСФСР и СССР".into(),
            achievements: "Организовал Октябрьскую революцию 1917 года и создал первое в мире социалистическое государство. Провёл национализацию промышленности, заключил Брестский мир, создал Красную Армию.".into(),
            biography: Some("Владимир Ильич Ульянов (Ленин) родился в 1870 году в семье инспектора народных училищ. Получил юридическое образование, но посвятил жизнь революционной деятельности. Развил марксистскую теорию применительно к российским условиям, создав учение, позже названное марксизмом-ленинизмом. Руководил большевистской партией с момента её создания. После Февральской революции 1917 года вернулся в Россию из эмиграции и возглавил Октябрьское вооружённое восстание, в результате которого к власти пришли большевики. Как глава первого советского правительства провёл радикальные социально-экономические преобразования: национализацию земли и промышленности, отделение церкви от государства, создание новой системы управления. В период Гражданской войны (1918-1922) отстоял советскую власть. В 1921 году ввёл Новую экономическую политику (НЭП), частично вернув рыночные отношения. Сыграл ключевую роль в образовании СССР в 1922 году.".into()),
            short_description: Some("Основатель Советского государства, теоретик марксизма-ленинизма и вождь Октябрьской революции".into()),
            legacy: Some("Ленин создал первое в мире государство рабочих и крестьян, заложил основы плановой экономики и однопартийной политической системы. Его идеи оказали глубокое влияние на мировое коммунистическое и рабочее движение XX века.".into()),
            years_in_power_start: Some(1917),
            years_in_power_end: Some(1924),
            historical_significance: 10,
            video_id: Some(1),
            is_published: true,
            ..Default::default()
        },
        Leader {
            id: 2,
            name_primary: "Иосиф Виссарионович Сталин".into(),
            name_secondary: "Joseph Vissarionovich Stalin".into(),
            slug: "stalin".into(),
            birth_year: Some(1878),
            birth_place: Some("Гори, Тифлисская губерния (Грузия)".into()),
            death_year: Some(1953),
            death_place: Some("Ближняя дача в Кунцево, под Москвой".into()),
            position: "Генеральный секретарь ЦК ВКП(б), затем КПСС, Председатель Совета министров СССР".into(),
            achievements: "Провёл форсированную индустриализацию и коллективизацию сельского хозяйства, превратив СССР в мощную промышленную державу. Руководил страной во время Великой Отечественной войны (1941-1945), одержав победу над нацистской Германией. Превратил СССР в ядерную сверхдержаву и одну из двух ведущих мировых держав.".into(),
            biography: Some("Иосиф Виссарионович Джугашвили (Сталин) родился в 1878 году в семье сапожника в Грузии. Учился в духовной семинарии, но был исключён за революционную деятельность. С начала XX века участвовал в революционном движении, неоднократно арестовывался и ссылался. После смерти Ленина в 1924 году в результате внутрипартийной борьбы постепенно сосредоточил в своих руках всю полноту власти. С конца 1920-х годов начал политику форсированной индустриализации - создание тяжёлой промышленности, строительство заводов, электростанций, развитие науки и образования. Одновременно провёл коллективизацию сельского хозяйства - объединение крестьянских хозяйств в колхозы. В 1930-е годы осуществил массовые политические репрессии против действительных и мнимых противников. Во время Великой Отечественной войны как Верховный Главнокомандующий руководил вооружёнными силами СССР. После войны восстановил разрушенную экономику, создал ядерное оружие, расширил влияние СССР в Восточной Европе и Азии.".into()),
            short_description: Some("Руководитель СССР в период индустриализации и Великой Отечественной войны".into()),
            legacy: Some("Сталин превратил СССР в индустриальную сверхдержаву с мощной экономикой и армией. Под его руководством была одержана победа в Великой Отечественной войне. Вместе с тем его правление сопровождалось массовыми репрессиями и нарушениями прав человека. Создал тоталитарную политическую систему и культ личности.".into()),
            years_in_power_start: Some(1924),
            years_in_power_end: Some(1953),
            historical_significance: 10,
            video_id: Some(2),
            is_published: true,
            ..Default::default()
        },
        Leader {
            id: 3,
            name_primary: "Никита Сергеевич Хрущёв".into(),
            name_secondary: "Nikita Sergeyevich Khrushchev".into(),
            slug: "khrushchev".into(),
            birth_year: Some(1894),
            birth_place: Some("Калиновка, Курская губерния (Россия)".into()),
            death_year: Some(1971),
            death_place: Some("Москва".into()),
            position: "Первый секретарь ЦК КПСС, Председатель Совета министров СССР".into(),
            achievements: "Провёл десталинизацию общества - разоблачил культ личности Сталина и ослабил политические репрессии. Руководил СССР в период Карибского кризиса (1962). Под его руководством СССР запустил первый искусственный спутник Земли (1957) и первого человека в космос - Юрия Гагарина (1961). Начал программу массового жилищного строительства (\"хрущёвки\").".into(),
            biography: Some("Никита Сергеевич Хрущёв родился в 1894 году в крестьянской семье. Работал слесарем, участвовал в Гражданской войне. Сделал партийную карьеру, руководил Московской партийной организацией, участвовал в индустриализации. Во время войны был членом военных советов на различных фронтах. После смерти Сталина в 1953 году в результате внутрипартийной борьбы стал главой партии и государства. На XX съезде КПСС в 1956 году выступил с докладом о культе личности Сталина, что положило начало процессу десталинизации. Провёл экономические реформы, расширил права союзных республик, улучшил отношения с Западом (\"оттепель\"). Развивал космическую программу, добившись выдающихся успехов. Начал массовое жилищное строительство, значительно улучшив жилищные условия миллионов советских граждан. В 1962 году пережил острейший международный кризис из-за размещения советских ракет на Кубе. Был снят с должности в 1964 году из-за волюнтаристских решений и неудач в экономике.".into()),
            short_description: Some("Инициатор десталинизации и космических достижений СССР".into()),
            legacy: Some("Хрущёв начал процесс либерализации советского общества, реабилитировал многих репрессированных, ослабил политический контроль. Превратил СССР в космическую державу. Период его правления известен как \"оттепель\" - время относительной свободы в культуре и науке.".into()),
            years_in_power_start: Some(1953),
            years_in_power_end: Some(1964),
            historical_significance: 8,
            video_id: Some(3),
            is_published: true,
            ..Default::default()
        },
        Leader {
            id: 4,
            name_primary: "Леонид Ильич Брежнев".into(),
            name_secondary: "Leonid Ilyich Brezhnev".into(),
            slug: "brezhnev".into(),
            birth_year: Some(1906),
            birth_place: Some("Каменское (ныне Днепродзержинск), Украина".into()),
            death_year: Some(1982),
            death_place: Some("Москва".into()),
            position: "Генеральный секретарь ЦК КПСС, Председатель Президиума Верховного Совета СССР".into(),
            achievements: "Обеспечил период стабильности и предсказуемости в жизни страны. Укрепил военную мощь СССР, достигнув военно-стратегического паритета с США. Расширил влияние СССР в странах третьего мира. Подписал договоры об ограничении стратегических вооружений (ОСВ-1 и ОСВ-2), Заключительный акт СБСЕ в Хельсинки (1975). Провёл экономические реформы 1965 года (реформа Косыгина).".into(),
            biography: Some("Леонид Ильич Брежнев родился в 1906 году в рабочей семье. Получил инженерное образование, работал на металлургическом заводе. Сделал партийную карьеру на Украине. Во время Великой Отечественной войны служил в политических органах армии, дослужился до генерал-майора. После войны руководил партийными организациями в Молдавии и Казахстане. В 1964 году возглавил заговор против Хрущёва и стал Первым секретарём ЦК КПСС (с 1966 - Генеральным секретарём). Его правление характеризовалось стабильностью и отсутствием резких изменений. Была достигнута политика разрядки с Западом, подписаны важные международные соглашения. Укреплена обороноспособность страны, достигнут военный паритет с США. Однако к концу правления в экономике нарастали застойные явления - замедление темпов роста, дефицит товаров, технологическое отставание от Запада. Усилилась коррупция и бюрократизация. Была создана развитая система социального обеспечения, но свобода слова и инакомыслие подавлялись.".into()),
            short_description: Some("Руководитель СССР в период застоя и военного паритета с США".into()),
            legacy: Some("Период правления Брежнева (1964-1982) называют \"эпохой застоя\" из-за замедления экономического роста и нарастания кризисных явлений. Вместе с тем это была эпоха стабильности и уверенности в завтрашнем дне для большинства граждан. СССР достиг пика своей военной и геополитической мощи.".into()),
            years_in_power_start: Some(1964),
            years_in_power_end: Some(1982),
            historical_significance: 7,
            video_id: Some(4),
            is_published: true,
            ..Default::default()
        },
        Leader {
            id: 5,
            name_primary: "Юрий Владимирович Андропов".into(),
            name_secondary: "Yuri Vladimirovich Andropov".into(),
            slug: "andropov".into(),
            birth_year: Some(1914),
            birth_place: Some("станция Нагутская (ныне Ставропольский край)".into()),
            death_year: Some(1984),
            death_place: Some("Москва".into()),
            position: "Генеральный секретарь ЦК КПСС, бывший Председатель КГБ СССР".into(),
            achievements: "Начал кампанию по укреплению трудовой дисциплины и борьбе с коррупцией. Провёл экономический эксперимент на пяти промышленных предприятиях для повышения эффективности производства. Усилил борьбу с диссидентством. Попытался начать умеренные экономические реформы, которые позднее были продолжены при Горбачёве.".into(),
            biography: Some("Юрий Владимирович Андропов родился в 1914 году. Начал трудовую деятельность телеграфистом, затем работал на судоверфи. Получил высшее образование заочно. С 1940 года на партийной работе в Карелии. После войны работал в ЦК КПСС по международным вопросам. В 1954-1957 годах - посол в Венгрии, где наблюдал венгерское восстание 1956 года. С 1967 по 1982 год возглавлял КГБ СССР - дольше всех в истории этой организации. Под его руководством КГБ активно боролся с диссидентским движением, но при этом избегал массовых репрессий сталинского типа. После смерти Брежнева в ноябре 1982 года стал Генеральным секретарём ЦК КПСС. Начал кампанию по укреплению дисциплины и порядка, борьбе с коррупцией и нетрудовыми доходами. Провёл чистки партийного аппарата, пытался начать экономические реформы. Однако тяжёлая болезнь не позволила реализовать задуманные планы.".into()),
            short_description: Some("Бывший глава КГБ, инициатор борьбы с коррупцией и укрепления дисциплины".into()),
            legacy: Some("Андропов правил всего 15 месяцев, но успел начать процессы обновления, которые позднее вылились в перестройку. Его попытки укрепления дисциплины и борьбы с коррупцией были популярны в обществе. Считается, что при более длительном правлении мог бы провести умеренные реформы.".into()),
            years_in_power_start: Some(1982),
            years_in_power_end: Some(1984),
            historical_significance: 6,
            video_id: Some(5),
            is_published: true,
            ..Default::default()
        },
        Leader {
            id: 6,
            name_primary: "Константин Устинович Черненко".into(),
            name_secondary: "Konstantin Ustinovich Chernenko".into(),
            slug: "chernenko".into(),
            birth_year: Some(1911),
            birth_place: Some("село Большая Тёсь, Енисейская губерния (ныне Красноярский край)".into()),
            death_year: Some(1985),
            death_place: Some("Москва".into()),
            position: "Генеральный секретарь ЦК КПСС, Председатель Президиума Верховного Совета СССР".into(),
            achievements: "Продолжил политику своих предшественников, сохраняя консервативный курс. Под его руководством велись переговоры по разоружению с США. Поддерживал стабильность в управлении страной в сложный переходный период. Уделял внимание социальным программам и улучшению условий жизни населения.".into(),
            biography: Some("Константин Устинович Черненко родился в 1911 году в крестьянской семье в Сибири. В юности работал в сельском хозяйстве. Вступил в комсомол, затем в партию. Прошёл путь от рядового партийного работника до руководителя. Большую часть карьеры провёл в партийных органах, занимаясь идеологической работой. С 1960 года работал в аппарате ЦК КПСС. Был близким соратником Брежнева, заведовал Общим отделом ЦК. После смерти Андропова в феврале 1984 года был избран Генеральным секретарём ЦК КПСС, став самым возрастным руководителем СССР (72 года). Его правление продолжалось всего 13 месяцев и было отмечено консерватизмом и продолжением прежней политики. Из-за тяжёлой болезни фактически не мог активно руководить страной. Это был период нарастания кризисных явлений в экономике и ожидания перемен.".into()),
            short_description: Some("Последний лидер старой гвардии, переходная фигура перед перестройкой".into()),
            legacy: Some("Черненко стал последним представителем брежневской \"старой гвардии\" у власти. Его кратковременное правление рассматривается как переходный период между эпохой застоя и началом перестройки. Не оставил значительного следа в истории из-за краткости правления и тяжёлой болезни.".into()),
            years_in_power_start: Some(1984),
            years_in_power_end: Some(1985),
            historical_significance: 5,
            video_id: Some(6),
            is_published: true,
            ..Default::default()
        },
        Leader {
            id: 7,
            name_primary: "Михаил Сергеевич Горбачёв".into(),
            name_secondary: "Mikhail Sergeyevich Gorbachev".into(),
            slug: "gorbachev".into(),
            birth_year: Some(1931),
            birth_place: Some("село Привольное, Ставропольский край".into()),
            death_year: Some(2022),
            death_place: Some("Москва".into()),
            position: "Генеральный секретарь ЦК КПСС, Президент СССР".into(),
            achievements: "Инициировал масштабные реформы \"перестройка\" и \"гласность\", которые привели к демократизации общества. Прекратил холодную войну, вывел советские войска из Афганистана. Допустил объединение Германии. Получил Нобелевскую премию мира (1990) за вклад в окончание холодной войны. Ввёл многопартийность и свободу слова. Не смог предотвратить распад СССР, который прекратил существование 26 декабря 1991 года.".into(),
            biography: Some("Михаил Сергеевич Горбачёв родился в 1931 году в крестьянской семье на Ставрополье. Работал механизатором, окончил юридический факультет МГУ. Сделал партийную карьеру в Ставропольском крае. Попал в поле зрения Москвы благодаря поддержке Андропова. В 1978 году стал секретарём ЦК по сельскому хозяйству, в 1980 - членом Политбюро. После смерти Черненко в марте 1985 года был избран Генеральным секретарём ЦК КПСС, став самым молодым руководителем с 1920-х годов (54 года). Начал политику перестройки - реформирования советской системы. Провозгласил курс на гласность (свободу слова), демократизацию и ускорение социально-экономического развития. Начал переговоры с США о сокращении вооружений, улучшил отношения с Западом, что привело к окончанию холодной войны. В 1990 году стал первым и единственным Президентом СССР. Однако реформы привели к экономическому кризису, межнациональным конфликтам и распаду СССР. После путча ГКЧП в августе 1991 года фактически потерял власть. 25 декабря 1991 года объявил о своей отставке.".into()),
            short_description: Some("Последний лидер СССР, инициатор перестройки, лауреат Нобелевской премии мира".into()),
            legacy: Some("Горбачёв - одна из самых противоречивых фигур в истории. На Западе его ценят за окончание холодной войны и демократизацию. В России многие винят его в развале СССР и экономическом кризисе 1990-х. Его реформы положили конец советской системе и открыли новую эпоху в истории России и мира.".into()),
            years_in_power_start: Some(1985),
            years_in_power_end: Some(1991),
            historical_significance: 10,
            video_id: Some(7),
            is_published: true,
            ..Default::default()
        },
    ]
}

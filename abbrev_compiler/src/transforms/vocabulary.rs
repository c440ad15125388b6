//! Word banks for placeholder text

pub struct Vocabulary {
    /// Opening sentence of the first paragraph
    pub common: &'static [&'static str],
    pub words: &'static [&'static str],
}

impl Vocabulary {
    /// Word bank for a `lorem` suffix; Latin unless `ru` or `sp`
    pub fn for_lang(lang: &str) -> &'static Vocabulary {
        match lang {
            "ru" => &RUSSIAN,
            "sp" => &SPANISH,
            _ => &LATIN,
        }
    }
}

/// Pseudo-Latin words
pub const LATIN: Vocabulary = Vocabulary {
    common: &[
        "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipisicing", "elit",
    ],
    words: &[
        "exercitationem", "perferendis", "perspiciatis", "laborum", "eveniet", "sunt", "iure",
        "nam", "nobis", "eum", "cum", "officiis", "excepturi", "odio", "consectetur", "quasi",
        "aut", "quisquam", "vel", "eligendi", "itaque", "non", "odit", "tempore", "quaerat",
        "dignissimos", "facilis", "neque", "nihil", "expedita", "vitae", "vero", "ipsum",
        "nisi", "animi", "cumque", "pariatur", "velit", "modi", "natus", "iusto", "eaque",
        "sequi", "illo", "sed", "ex", "et", "voluptatibus", "tempora", "veritatis", "ratione",
        "assumenda", "incidunt", "nostrum", "placeat", "aliquid", "fuga", "provident",
        "praesentium", "rem", "necessitatibus", "suscipit", "adipisci", "quidem", "possimus",
        "voluptas", "debitis", "sint", "accusantium", "unde", "sapiente", "voluptate", "qui",
        "aspernatur", "laudantium", "soluta", "amet", "quo", "aliquam", "saepe", "culpa",
        "libero", "ipsa", "dicta", "reiciendis", "nesciunt", "doloribus", "autem", "impedit",
        "minima", "maiores", "repudiandae", "ipsam", "obcaecati", "ullam", "enim", "totam",
        "delectus", "ducimus", "quis", "voluptates", "dolores", "molestiae", "harum", "dolorem",
        "quia", "voluptatem", "molestias", "magni", "distinctio", "omnis", "illum", "dolorum",
        "voluptatum", "ea", "quas", "quam", "corporis", "quae", "blanditiis", "atque",
        "deserunt", "laboriosam", "earum", "consequuntur", "hic", "cupiditate", "quibusdam",
        "accusamus", "ut", "rerum", "error", "minus", "eius", "ab", "ad", "nemo", "fugit",
        "officia", "at", "in", "id", "quos", "reprehenderit", "numquam", "iste", "fugiat",
        "sit", "inventore", "beatae", "repellendus", "magnam", "recusandae", "quod",
        "explicabo", "doloremque", "aperiam", "consequatur", "asperiores", "commodi", "optio",
        "dolor", "labore", "temporibus", "repellat", "veniam", "architecto", "est", "esse",
        "mollitia", "nulla", "a", "similique", "eos", "alias", "dolore", "tenetur", "deleniti",
        "porro", "facere", "maxime", "corrupti",
    ],
};

/// Russian words
pub const RUSSIAN: Vocabulary = Vocabulary {
    common: &[
        "далеко-далеко", "за", "словесными", "горами", "в стране", "гласных", "и согласных",
        "живут", "рыбные", "тексты",
    ],
    words: &[
        "вдали", "от всех", "они", "буквенных", "домах", "на берегу", "семантика", "большого",
        "языкового", "океана", "маленький", "ручеек", "даль", "журчит", "по всей",
        "обеспечивает", "ее", "всеми", "необходимыми", "правилами", "эта", "парадигматическая",
        "страна", "которой", "жаренные", "предложения", "залетают", "прямо", "рот", "даже",
        "всемогущая", "пунктуация", "не", "имеет", "власти", "над", "рыбными", "текстами",
        "ведущими", "безорфографичный", "образ", "жизни", "однажды", "одна", "маленькая",
        "строчка", "рыбного", "текста", "имени", "lorem", "ipsum", "решила", "выйти", "большой",
        "мир", "грамматики", "великий", "оксмокс", "предупреждал", "о", "злых", "запятых",
        "диких", "знаках", "вопроса", "коварных", "точках", "запятой", "но", "текст", "дал",
        "сбить", "себя", "толку", "он", "собрал", "семь", "своих", "заглавных", "букв",
        "подпоясал", "инициал", "за", "пояс", "пустился", "дорогу", "взобравшись", "первую",
        "вершину", "курсивных", "гор", "бросил", "последний", "взгляд", "назад", "силуэт",
        "своего", "родного", "города", "буквоград", "заголовок", "деревни", "алфавит",
        "подзаголовок", "своего", "переулка", "грустный", "реторический", "вопрос", "скатился",
        "его", "щеке", "продолжил", "свой", "путь", "дороге", "встретил", "рукопись", "она",
        "предупредила", "моей", "все", "переписывается", "несколько", "раз", "единственное",
        "что", "меня", "осталось", "это", "приставка", "возвращайся", "ты", "лучше", "свою",
        "безопасную", "страну", "послушавшись", "рукописи", "наш", "продолжил", "свой", "путь",
        "вскоре", "ему", "повстречался", "коварный", "составитель", "рекламных", "текстов",
        "напоивший", "языком", "речью", "заманивший", "свое", "агентство", "которое",
        "использовало", "снова", "снова", "своих", "проектах", "если", "переписали", "то",
        "живет", "там", "до", "сих", "пор",
    ],
};

/// Spanish words
pub const SPANISH: Vocabulary = Vocabulary {
    common: &[
        "mujer", "uno", "dolor", "más", "de", "poder", "mismo", "si",
    ],
    words: &[
        "ejercicio", "preferencia", "perspicacia", "laboral", "paño", "suntuoso", "molde",
        "namibia", "planeador", "mirar", "demás", "oficinista", "excepción", "odio",
        "consecuencia", "casi", "auto", "chicharra", "velo", "elixir", "ataque", "no", "odio",
        "temporal", "cuórum", "dignísimo", "facilismo", "letra", "nihilista", "expedición",
        "alma", "alveolar", "aparte", "león", "animal", "como", "paria", "belleza", "modo",
        "natividad", "justo", "ataque", "séquito", "pillo", "sed", "ex", "y", "voluminoso",
        "temporalidad", "verdades", "racional", "asunción", "incidente", "marejada", "placenta",
        "amanecer", "fuga", "previsor", "presentación", "lejos", "necesariamente", "sospechoso",
        "adiposidad", "quindío", "pócima", "voluble", "débito", "sintió", "accesorio", "falda",
        "sapiencia", "volutas", "queso", "permacultura", "laudo", "soluciones", "entero", "pan",
        "litro", "tonelada", "culpa", "libertario", "mosca", "dictado", "reincidente",
        "nascimiento", "dolor", "escolar", "impedimento", "mínima", "mayores", "repugnante",
        "dulce", "obcecado", "montaña", "enigma", "total", "deletéreo", "décima", "cábala",
        "fotografía", "dolores", "molesto", "olvido", "paciencia", "resiliencia", "voluntad",
        "molestias", "magnífico", "distinción", "ovni", "marejada", "cerro", "torre", "y",
        "abogada", "manantial", "corporal", "agua", "crepúsculo", "ataque", "desierto",
        "laboriosamente", "angustia", "afortunado", "alma", "encefalograma", "materialidad",
        "cosas", "o", "renuncia", "error", "menos", "conejo", "abadía", "analfabeto", "remo",
        "fugacidad", "oficio", "en", "almácigo", "vos", "pan", "represión", "números", "triste",
        "refugiado", "trote", "inventor", "corchea", "repelente", "magma", "recusado", "patrón",
        "explícito", "paloma", "síndrome", "inmune", "autoinmune", "comodidad", "ley",
        "vietnamita", "demonio", "tasmania", "repeler", "apéndice", "arquitecto", "columna",
        "yugo", "computador", "mula", "a", "propósito", "fantasía", "alias", "rayo", "tenedor",
        "deleznable", "ventana", "cara", "anemia", "corrupto",
    ],
};

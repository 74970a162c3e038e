//! Prompt Construction
//!
//! Builds the system turn from a `SessionContext` and the scoring request
//! sent after the session.

use mock_interview_core::{InterviewCategory, InterviewerTone, SessionContext, Turn, TurnRole};

const SKILL_KEYWORDS: &[&str] = &[
    "javascript", "python", "java", "react", "vue", "node", "spring", "mysql", "redis", "docker",
    "kubernetes", "aws", "git", "linux", "html", "css", "typescript", "mongodb", "postgresql",
    "nginx", "jenkins", "webpack", "babel", "sass", "less", "jquery", "bootstrap", "tailwind",
    "express", "koa", "django", "flask", "laravel", "php", "c++", "c#", "go", "rust", "swift",
    "kotlin", "flutter", "react native", "android", "ios", "unity", "tensorflow", "pytorch",
    "opencv", "pandas", "numpy", "scikit-learn", "elasticsearch", "kafka", "rabbitmq",
    "microservice", "devops", "ci/cd", "agile", "scrum",
];

const PROJECT_INDICATORS: &[&str] = &[
    "项目", "project", "开发", "设计", "实现", "负责", "参与", "主导", "搭建", "优化",
];

/// Skills and project lines found in a resume
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeAnalysis {
    pub skills: Vec<&'static str>,
    pub projects: Vec<String>,
}

impl ResumeAnalysis {
    fn skills_line(&self) -> String {
        if self.skills.is_empty() {
            "待了解".to_string()
        } else {
            self.skills.join(", ")
        }
    }
}

/// Keyword scan of the resume. Project lines must be longer than ten
/// characters and mention an indicator.
pub fn analyze_resume(resume_text: &str) -> ResumeAnalysis {
    let lower = resume_text.to_lowercase();
    let skills = SKILL_KEYWORDS
        .iter()
        .copied()
        .filter(|skill| lower.contains(skill))
        .collect();

    let projects = resume_text
        .lines()
        .filter(|line| {
            line.chars().count() > 10 && PROJECT_INDICATORS.iter().any(|ind| line.contains(ind))
        })
        .map(|line| line.trim().to_string())
        .collect();

    ResumeAnalysis { skills, projects }
}

fn tone_block(tone: InterviewerTone) -> &'static str {
    match tone {
        InterviewerTone::Strict => {
            "**风格：** 严格专业型\n- 追问细节，要求精确回答\n- 适度施压，测试抗压能力\n- 注重逻辑性和准确性\n- 直接指出问题和不足"
        }
        InterviewerTone::Friendly => {
            "**风格：** 友好鼓励型\n- 营造轻松愉快的氛围\n- 鼓励候选人充分表达\n- 关注潜力和成长性\n- 给予积极正面的反馈"
        }
        InterviewerTone::Open => {
            "**风格：** 开放探索型\n- 鼓励创新思维和想法\n- 重视思考过程而非标准答案\n- 探索式对话，深入讨论\n- 关注适应性和发展潜力"
        }
    }
}

fn time_strategy(duration_minutes: u32) -> String {
    if duration_minutes <= 15 {
        format!(
            "**时间策略：** 快速验证模式（{}分钟）\n- 开场：1分钟简短介绍\n- 核心考察：10分钟，3-4个关键问题\n- 候选人提问：4分钟\n- 重点：快速验证核心能力，避免复杂深入的讨论",
            duration_minutes
        )
    } else if duration_minutes <= 30 {
        format!(
            "**时间策略：** 标准面试模式（{}分钟）\n- 开场：3分钟破冰和简历概述\n- 主要考察：20分钟，5-7个问题\n- 候选人提问：5分钟\n- 总结：2分钟\n- 重点：平衡深度和广度，适度追问",
            duration_minutes
        )
    } else {
        format!(
            "**时间策略：** 深度面试模式（{}分钟）\n- 开场：5分钟详细了解背景\n- 深度考察：35分钟，8-12个问题\n- 候选人提问：8分钟\n- 总结：7分钟\n- 重点：深入探讨，全面评估，可包含复杂场景题",
            duration_minutes
        )
    }
}

fn output_rules(kind: &str) -> String {
    format!(
        "## 重要输出要求\n\
         **请严格按照以下格式输出：**\n\
         - 直接输出面试官的话，不要添加任何前缀（如\"面试官：\"）\n\
         - 不要使用任何格式标记（如**、##等）\n\
         - 不要包含候选人的占位符文本（如\"**候选人**：（候选人进行自我介绍）\"）\n\
         - 只输出纯净的面试官对话内容\n\n\
         示例正确格式：\n\
         \"您好，很高兴今天能有机会与您进行{kind}。首先，请您简单介绍一下自己，以及您为什么对这个职位感兴趣。\"",
        kind = kind
    )
}

/// System turn for a session
pub fn build_system_prompt(context: &SessionContext) -> String {
    let analysis = analyze_resume(&context.resume_text);
    let title = &context.job_title;
    let company = context
        .company_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .map(|name| format!("\n**公司：** {}", name.trim()))
        .unwrap_or_default();

    let (heading, role, candidate, focus, opening, kind) = match context.category {
        InterviewCategory::Technical => (
            "# 🔧 技术面试官",
            format!("你是一位资深技术面试官，专门负责{}的技术能力评估。", title),
            format!(
                "**技能：** {}\n**项目：** {}个相关项目",
                analysis.skills_line(),
                analysis.projects.len()
            ),
            format!(
                "## 技术考察重点\n\
                 1. **核心技术栈**：深入考察{}相关的技术能力\n\
                 2. **项目经验**：验证简历中项目的技术深度和个人贡献\n\
                 3. **问题解决**：通过场景题考察解决技术问题的思路\n\
                 4. **代码质量**：了解编码规范、测试、性能优化等意识\n\
                 5. **技术视野**：评估对新技术的学习能力和行业理解",
                title
            ),
            "现在开始技术面试，先进行开场白，然后基于候选人简历中的技术栈提出第一个具体的技术问题。",
            "技术面试",
        ),
        InterviewCategory::Behavioral => (
            "# 👥 行为面试官",
            format!(
                "你是一位经验丰富的HR面试官，专门负责{}的软技能和文化匹配度评估。",
                title
            ),
            format!("**工作经历：** {}段相关经验", analysis.projects.len()),
            "## 行为考察重点\n\
             1. **团队协作**：了解在团队中的角色和协作方式\n\
             2. **沟通能力**：评估表达能力和倾听技巧\n\
             3. **问题解决**：通过STAR法则了解解决问题的方法\n\
             4. **学习成长**：考察学习能力和自我提升意识\n\
             5. **文化匹配**：评估价值观和工作态度是否符合企业文化\n\
             6. **抗压能力**：了解在压力下的表现和应对策略"
                .to_string(),
            "现在开始行为面试，先进行温和的开场白，然后基于候选人的工作经历提出第一个行为问题。",
            "面试",
        ),
        InterviewCategory::Comprehensive => (
            "# 🎯 综合面试官",
            format!(
                "你是一位全能面试官，需要全面评估{}候选人的技术能力和综合素质。",
                title
            ),
            format!(
                "**技能：** {}\n**经验：** {}个相关项目",
                analysis.skills_line(),
                analysis.projects.len()
            ),
            "## 综合考察重点\n\
             1. **技术能力**：核心技术栈的掌握程度和应用经验\n\
             2. **项目经验**：技术选型、架构设计、问题解决能力\n\
             3. **团队协作**：沟通能力、协作方式、领导潜力\n\
             4. **学习能力**：新技术学习、知识更新、自我提升\n\
             5. **职业规划**：发展方向、目标设定、职业成熟度\n\
             6. **文化匹配**：价值观、工作态度、团队融入度"
                .to_string(),
            "现在开始综合面试，先进行专业的开场白，然后从技术能力开始，逐步深入到综合素质的考察。",
            "综合面试",
        ),
    };

    format!(
        "{heading}\n\n{role}\n\n## 面试官特征\n{tone}\n\n## 候选人信息\n**简历：** {resume}\n{candidate}\n\n## 职位要求\n{description}{company}\n\n## 面试策略\n{time}\n\n{focus}\n\n{opening}\n\n{rules}",
        heading = heading,
        role = role,
        tone = tone_block(context.tone),
        resume = context.resume_text,
        candidate = candidate,
        description = context.job_description,
        company = company,
        time = time_strategy(context.duration_minutes),
        focus = focus,
        opening = opening,
        rules = output_rules(kind),
    )
}

/// System message for the scoring request
pub const FEEDBACK_SYSTEM_PROMPT: &str =
    "你是一位经验丰富的HR专家和技术面试官，擅长客观评估候选人的面试表现并给出专业建议。";

/// "候选人: ..." / "面试官: ..." lines, system turns skipped
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .filter_map(|turn| match turn.role {
            TurnRole::User => Some(format!("候选人: {}", turn.content)),
            TurnRole::Assistant => Some(format!("面试官: {}", turn.content)),
            TurnRole::System => None,
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// User message asking for a JSON scorecard
pub fn build_feedback_prompt(turns: &[Turn]) -> String {
    format!(
        r#"请作为专业的HR和技术专家，基于以下面试对话内容，生成详细的面试反馈报告。

面试对话:
{}

请按照以下JSON格式返回评估结果，分数范围为1-10分：
{{
  "overallScore": 8.5,
  "dimensionScores": {{
    "逻辑清晰度": 8.0,
    "专业契合度": 8.5,
    "表达能力": 8.2,
    "问题理解力": 8.8,
    "压力应对力": 7.5
  }},
  "strengths": ["具体的优势点1", "具体的优势点2", "具体的优势点3"],
  "improvements": ["具体的改进建议1", "具体的改进建议2", "具体的改进建议3"],
  "summary": "详细的总结评价"
}}

请确保返回的是有效的JSON格式，评分要客观公正，建议要具体可行。"#,
        render_transcript(turns)
    )
}

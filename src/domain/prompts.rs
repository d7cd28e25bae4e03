//! Prompt templates exposed via Model Context Protocol
//!
//! `math_tutor` and `code_review` interpolate caller arguments into fixed
//! instructional templates. Every argument is optional.

use crate::domain::utils::argument_or_default;
use crate::mcp::registry::{
    PromptArgumentDefinition, PromptArguments, PromptDefinition, PromptMessage, PromptResult,
    Role,
};

pub const MATH_TUTOR_PROMPT: &str = "math_tutor";
pub const CODE_REVIEW_PROMPT: &str = "code_review";

fn optional_argument(name: &'static str, description: &'static str) -> PromptArgumentDefinition {
    PromptArgumentDefinition {
        name,
        description,
        required: false,
    }
}

pub fn math_tutor_definition() -> PromptDefinition {
    PromptDefinition {
        name: MATH_TUTOR_PROMPT,
        description: "A comprehensive math tutor that provides detailed explanations, step-by-step solutions, and interactive learning experiences",
        arguments: vec![
            optional_argument(
                "topic",
                "The specific math topic to focus on (e.g., algebra, calculus, geometry, statistics, trigonometry, linear algebra, differential equations)",
            ),
            optional_argument(
                "level",
                "The difficulty level and educational context (elementary, middle school, high school, undergraduate, graduate, professional)",
            ),
            optional_argument(
                "learning_style",
                "Preferred learning approach (visual, analytical, practical, conceptual, problem-solving focused)",
            ),
        ],
    }
}

pub fn code_review_definition() -> PromptDefinition {
    PromptDefinition {
        name: CODE_REVIEW_PROMPT,
        description: "A comprehensive code reviewer that provides detailed analysis, suggestions, and best practices guidance",
        arguments: vec![
            optional_argument(
                "language",
                "The programming language or technology stack (e.g., Python, JavaScript, Go, Java, C++, React, Django)",
            ),
            optional_argument(
                "focus",
                "Primary review focus areas (performance, security, readability, architecture, testing, maintainability, scalability)",
            ),
            optional_argument(
                "experience_level",
                "Target developer experience level (junior, mid-level, senior, lead, architect)",
            ),
            optional_argument(
                "review_type",
                "Type of review (pre-commit, post-implementation, refactoring, security audit, performance optimization)",
            ),
        ],
    }
}

pub fn math_tutor(arguments: &PromptArguments) -> PromptResult {
    let topic = argument_or_default(arguments, "topic", "general mathematics");
    let level = argument_or_default(arguments, "level", "intermediate");
    let learning_style = argument_or_default(arguments, "learning_style", "balanced");

    let body = format!(
        r#"You are an expert mathematics tutor specializing in {topic} at the {level} level, with a {learning_style} teaching approach. Your role is to:

**TEACHING METHODOLOGY:**
- Break down complex concepts into digestible, logical steps
- Provide multiple solution approaches when applicable
- Use real-world analogies and examples to illustrate abstract concepts
- Encourage critical thinking through guided questions
- Adapt explanations based on student understanding

**PROBLEM-SOLVING APPROACH:**
1. **Understanding**: Ensure complete comprehension of the problem
2. **Strategy**: Identify the most appropriate method(s)
3. **Execution**: Work through solutions step-by-step
4. **Verification**: Check answers and explore alternative approaches
5. **Application**: Connect to broader mathematical concepts

**COMMUNICATION STYLE:**
- Use clear, precise mathematical language
- Provide visual representations when helpful (describe diagrams, graphs, charts)
- Include common mistakes to avoid
- Offer practice problems with varying difficulty
- Give constructive feedback and encouragement

**SPECIFIC FOCUS FOR {topic}:**
- Fundamental principles and theorems
- Key formulas and when to apply them
- Problem-solving patterns and techniques
- Connections to other mathematical areas
- Practical applications and relevance

**INTERACTION GUIDELINES:**
- Ask clarifying questions when problems are ambiguous
- Provide hints before full solutions when appropriate
- Explain the 'why' behind mathematical procedures
- Offer additional resources for deeper understanding
- Maintain patience and positive reinforcement

Please share your mathematical question, problem, or concept you'd like to explore. I'll provide comprehensive guidance tailored to your {level} level understanding with a {learning_style} learning approach."#
    );

    PromptResult {
        title: format!(
            "Comprehensive Math Tutoring: {topic} ({level} level, {learning_style} approach)"
        ),
        messages: vec![PromptMessage::text(Role::User, body)],
    }
}

pub fn code_review(arguments: &PromptArguments) -> PromptResult {
    let language = argument_or_default(arguments, "language", "general programming");
    let focus = argument_or_default(arguments, "focus", "comprehensive quality");
    let experience_level = argument_or_default(arguments, "experience_level", "mid-level");
    let review_type = argument_or_default(arguments, "review_type", "general review");

    let body = format!(
        r#"You are a senior software engineer and code review expert specializing in {language}, conducting a {review_type} focused on {focus} for a {experience_level} developer. Your comprehensive review should cover:

**CODE QUALITY ASSESSMENT:**
1. **Functionality & Logic**
   - Correctness of implementation
   - Edge case handling
   - Error handling and recovery
   - Input validation and sanitization

2. **Code Structure & Design**
   - Adherence to SOLID principles
   - Design patterns usage
   - Separation of concerns
   - Modularity and reusability

3. **Performance & Efficiency**
   - Algorithm complexity analysis
   - Memory usage optimization
   - Database query efficiency
   - Caching strategies

4. **Security Considerations**
   - Vulnerability identification
   - Authentication and authorization
   - Data encryption and protection
   - Secure coding practices

5. **Maintainability & Readability**
   - Code clarity and self-documentation
   - Naming conventions
   - Comment quality and necessity
   - Code organization and structure

**{language} SPECIFIC GUIDELINES:**
- Language-specific best practices
- Framework/library conventions
- Performance characteristics
- Common pitfalls and anti-patterns
- Ecosystem-specific tools and utilities

**REVIEW METHODOLOGY:**
**POSITIVE FEEDBACK:**
- Highlight well-implemented sections
- Acknowledge good practices
- Recognize creative solutions

**CONSTRUCTIVE CRITICISM:**
- Specific, actionable suggestions
- Code examples for improvements
- Explanation of reasoning behind recommendations
- Alternative implementation approaches

**PRIORITY CLASSIFICATION:**
- 🔴 Critical: Security issues, bugs, breaking changes
- 🟡 Important: Performance, maintainability concerns
- 🔵 Nice-to-have: Style improvements, minor optimizations

**DOCUMENTATION & TESTING:**
- Test coverage adequacy
- Documentation completeness
- API documentation quality
- Inline comment appropriateness

**COLLABORATION NOTES:**
- Learning opportunities for the developer
- Knowledge sharing suggestions
- Team standards alignment
- Future improvement recommendations

Please provide the code you'd like reviewed, and I'll deliver a thorough analysis appropriate for a {experience_level} developer, focusing on {focus} aspects in this {review_type} context."#
    );

    PromptResult {
        title: format!(
            "Comprehensive Code Review: {language} ({focus} focus, {experience_level} level, {review_type})"
        ),
        messages: vec![PromptMessage::text(Role::Assistant, body)],
    }
}
